macro_rules! var {
    ($n:expr) => {
        $crate::term::Term::Variable($n)
    };
}
macro_rules! abs {
    ($body:expr) => {
        $crate::term::Term::Abstraction($body.into())
    };
}
macro_rules! app {
    ($lhs:expr, $rhs:expr) => {
        $crate::term::Term::Application($lhs.into(), $rhs.into())
    };
}
macro_rules! ref_ {
    ($entry:expr) => {
        $crate::term::Term::Reference($entry)
    };
}
