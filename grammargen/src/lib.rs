
mod input;
mod macro_def;

/*
 * grammar! {
 *     start: s,
 *     eof: EOF,
 *     rules: {
 *         s -> key EOF,
 *         key -> WORD,
 *         key -> key WORD,
 *     }
 * }
 *
 * Evaluates to a `Result<shiftred::Grammar, shiftred::Error>`.
 */
#[proc_macro]
pub fn grammar(input: proc_macro::TokenStream) -> proc_macro::TokenStream {
    macro_def::grammar(input)
}
