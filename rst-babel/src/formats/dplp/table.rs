//! The token table of DPLP output
//!
//!     One token per line, tab separated, in the column layout of DPLP's `.merge` files:
//!     sentence, token, word, lemma, POS, dependency label, head, NER, partial parse, EDU.
//!     Only the word (third column) and the EDU number (last column) matter here. EDU numbers
//!     count up from 1 and never skip.

use rst_parser::rst::error::{ConversionError, ConversionResult};

const WORD_COLUMN: usize = 2;

/// EDU texts in order. `offset` is the byte position of `table` in the whole document.
pub fn read_edus(table: &str, offset: usize) -> ConversionResult<Vec<String>> {
    let mut edus: Vec<Vec<&str>> = Vec::new();
    let mut line_start = offset;

    for raw_line in table.split_inclusive('\n') {
        let at = line_start;
        line_start += raw_line.len();
        let line = raw_line.trim_end_matches(|c| c == '\n' || c == '\r');
        if line.trim().is_empty() {
            continue;
        }

        let columns: Vec<&str> = line.split('\t').collect();
        if columns.len() <= WORD_COLUMN + 1 {
            return Err(ConversionError::malformed_at(
                format!(
                    "token line has {} columns, expected the word and the EDU number",
                    columns.len()
                ),
                at,
            ));
        }
        let word = columns[WORD_COLUMN];
        let number = columns[columns.len() - 1].trim();
        let number: usize = number.parse().map_err(|_| {
            ConversionError::malformed_at(format!("EDU number '{}' is not a number", number), at)
        })?;

        if number == edus.len() + 1 {
            edus.push(Vec::new());
        } else if number == 0 || number != edus.len() {
            return Err(ConversionError::malformed_at(
                format!(
                    "EDU {} follows EDU {}; EDU numbers count up from 1",
                    number,
                    edus.len()
                ),
                at,
            ));
        }
        if let Some(words) = edus.last_mut() {
            words.push(word);
        }
    }

    Ok(edus.into_iter().map(|words| words.join(" ")).collect())
}
