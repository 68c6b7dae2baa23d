use chumsky::prelude::*;

use crate::term::Term;

pub type ParseError = Simple<char>;

pub trait SimpleParser<O>: Parser<char, O, Error = ParseError> {}
impl<O, T> SimpleParser<O> for T where T: Parser<char, O, Error = ParseError> {}

/// `00 M` abstraction, `01 M N` application, `1^(k+1) 0` variable `k`.
pub fn term_parser() -> impl SimpleParser<Term> {
    recursive(|term| {
        let abstraction = just("00")
            .ignore_then(term.clone())
            .map(|body: Term| Term::Abstraction(body.into()));
        let application = just("01")
            .ignore_then(term.clone())
            .then(term)
            .map(|(lhs, rhs): (Term, Term)| Term::Application(lhs.into(), rhs.into()));
        let variable = just('1')
            .repeated()
            .at_least(1)
            .then_ignore(just('0'))
            .map(|ones: Vec<char>| Term::Variable(ones.len() - 1));
        choice((abstraction, application, variable))
    })
    .labelled("term")
}

pub fn parse_text(input: &str) -> Result<Term, Vec<ParseError>> {
    term_parser()
        .then_ignore(text::whitespace())
        .then_ignore(end())
        .parse(input)
}

/// Reads least-significant-bit-first packed BLC; the last byte may be zero padded.
pub fn parse_packed(bytes: &[u8]) -> Result<Term, Vec<ParseError>> {
    let symbols = bytes
        .iter()
        .flat_map(|byte| (0..8).map(move |i| if byte >> i & 1 == 1 { '1' } else { '0' }))
        .collect::<String>();
    term_parser()
        .then_ignore(just('0').repeated().at_most(7))
        .then_ignore(end())
        .parse(symbols.as_str())
}
