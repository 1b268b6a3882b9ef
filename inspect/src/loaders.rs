
use shiftred::{stream, Production, Symbol, Token};

/*
 * One rule per line :
 *
 *   key -> key WORD   # comment
 *   nothing ->
 *
 * Blank lines and comments are skipped.
 */
pub fn parse_grammar(src: &str) -> Result<Vec<Production>, String> {
    let mut productions = Vec::new();

    for (i, line) in src.lines().enumerate() {
        let line = line.split('#').next().unwrap_or("").trim();
        if line.is_empty() {
            continue
        }

        let (lhs, rhs) = line.split_once("->")
            .ok_or_else(|| format!("line {} : expected \"->\".", i + 1))?;

        let mut lhs = lhs.split_whitespace();
        let name = match (lhs.next(), lhs.next()) {
            (Some(name), None) => name,
            (None, _) => Err(format!("line {} : missing left-hand side.", i + 1))?,
            (Some(_), Some(_)) => Err(format!("line {} : the left-hand side is a single symbol.", i + 1))?,
        };

        let rhs: Vec<Symbol> = rhs.split_whitespace().map(Symbol::from).collect();
        productions.push(Production::from_symbols(Symbol::from(name), rhs));
    }

    if productions.is_empty() {
        Err("No rules.")?
    }

    Ok(productions)
}

fn words(src: &str) -> Vec<(usize, &str)> {
    let mut res = Vec::new();
    let mut start = None;

    for (i, c) in src.char_indices() {
        match (c.is_whitespace(), start) {
            (true, Some(s)) => {
                res.push((s, &src[s..i]));
                start = None;
            },
            (false, None) => start = Some(i),
            _ => (),
        }
    }
    if let Some(s) = start {
        res.push((s, &src[s..]));
    }

    res
}

/*
 * Whitespace-separated `SYMBOL` or `SYMBOL:text` items. Positions
 * are byte offsets in `src`.
 */
pub fn parse_tokens(src: &str, eof: &Symbol) -> Result<Vec<Token>, String> {
    let lexemes = words(src).into_iter().map(|(position, word)| {
        let (id, text) = word.split_once(':').unwrap_or((word, word));
        if id.is_empty() {
            Err(format!("offset {} : missing symbol in \"{}\".", position, word))
        } else {
            Ok((id, text, position))
        }
    }).collect::<Result<Vec<_>, String>>()?;

    Ok(stream(lexemes, eof))
}
