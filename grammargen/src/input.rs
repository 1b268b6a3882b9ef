
use syn::{braced, Token, Result, Ident};
use syn::parse::{Parse, ParseStream};

mod kw {
    use syn::custom_keyword;

    custom_keyword!(start);
    custom_keyword!(eof);
    custom_keyword!(rules);
}

pub struct MacroInput {
    pub start: Ident,
    pub eof: Ident,
    pub rules: Vec<Rule>,
}

/// `lhs -> s1 s2 ...`, where the right-hand side may be empty.
pub struct Rule {
    pub lhs: Ident,
    pub rhs: Vec<Ident>,
}

impl Parse for Rule {
    fn parse(input: ParseStream) -> Result<Self> {
        let lhs = input.parse::<Ident>()?;
        input.parse::<Token![->]>()?;

        let mut rhs = Vec::new();
        while input.peek(Ident) {
            rhs.push(input.parse::<Ident>()?);
        }

        Ok(Rule {lhs, rhs})
    }
}

fn parse_named<KW: Parse>(input: ParseStream) -> Result<Ident> {
    input.parse::<KW>()?;
    input.parse::<Token![:]>()?;
    let ident = input.parse()?;
    input.parse::<Token![,]>()?;
    Ok(ident)
}

fn parse_rules(input: ParseStream) -> Result<Vec<Rule>> {
    input.parse::<kw::rules>()?;
    input.parse::<Token![:]>()?;

    let rules;
    braced!(rules in input);
    let rules = rules.parse_terminated::<_, Token![,]>(Rule::parse)?;

    Ok(rules.into_iter().collect())
}

impl Parse for MacroInput {
    fn parse(input: ParseStream) -> Result<Self> {
        let start = parse_named::<kw::start>(input)?;
        let eof = parse_named::<kw::eof>(input)?;
        let rules = parse_rules(input)?;

        if input.peek(Token![,]) {
            input.parse::<Token![,]>()?;
        }

        Ok(MacroInput {start, eof, rules})
    }
}
