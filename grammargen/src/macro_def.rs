
use proc_macro2::TokenStream;
use quote::quote;
use syn::{parse_macro_input, Result, Error, Ident};

use shiftred::Symbol;

use super::input::*;

fn is_terminal(ident: &Ident) -> bool {
    Symbol::new(&ident.to_string()).is_terminal()
}

fn check_rules(rules: &[Rule]) -> Result<()> {
    rules.iter().enumerate().try_for_each::<_, Result<()>>(|(i, rule)| {
        if is_terminal(&rule.lhs) {
            Err(Error::new(rule.lhs.span(), "Terminals can't be expanded."))?
        }

        let same = |other: &Rule| {
            other.lhs == rule.lhs
                && other.rhs.len() == rule.rhs.len()
                && other.rhs.iter().zip(rule.rhs.iter()).all(|(a, b)| a == b)
        };

        if rules[0..i].iter().any(same) {
            Err(Error::new(rule.lhs.span(), "Already defined."))
        } else {
            Ok(())
        }
    })
}

fn check(input: &MacroInput) -> Result<()> {
    if input.rules.is_empty() {
        Err(Error::new(input.start.span(), "No rules."))?
    }

    check_rules(&input.rules)?;

    let empty: Vec<&Ident> = input.rules.iter().filter(|rule| rule.rhs.is_empty()).map(|rule| &rule.lhs).collect();
    if let Some(ident) = input.rules.iter().flat_map(|rule| rule.rhs.iter()).find(|ident| empty.contains(ident)) {
        Err(Error::new(ident.span(), "Empty rules can't be used."))?
    }

    if is_terminal(&input.start) {
        Err(Error::new(input.start.span(), "The start symbol must be a non-terminal."))?
    }
    if !input.rules.iter().any(|rule| rule.lhs == input.start) {
        Err(Error::new(input.start.span(), "No such non-terminal."))?
    }
    if !is_terminal(&input.eof) {
        Err(Error::new(input.eof.span(), "The end-of-input symbol must be a terminal."))?
    }

    Ok(())
}

fn build_productions(rules: &[Rule]) -> TokenStream {
    let prods = rules.iter().map(|rule| {
        let lhs = rule.lhs.to_string();
        let rhs = rule.rhs.iter().map(|ident| ident.to_string());
        quote! {
            ::shiftred::Production::from_symbols(
                ::shiftred::Symbol::new(#lhs),
                vec!(#(::shiftred::Symbol::new(#rhs)),*),
            )
        }
    });

    quote! {
        vec!(#(#prods),*)
    }
}

pub fn grammar(input: proc_macro::TokenStream) -> proc_macro::TokenStream {
    let input = parse_macro_input!(input as MacroInput);

    let expanded = match check(&input) {
        Ok(()) => {
            let start = input.start.to_string();
            let eof = input.eof.to_string();
            let productions = build_productions(&input.rules);

            quote! {
                {
                    let config = ::shiftred::Config::new(#start, #eof);
                    ::shiftred::Grammar::new(config, #productions)
                }
            }
        },
        Err(e) => e.to_compile_error()
    };

    proc_macro::TokenStream::from(expanded)
}
