// External Crate Imports
use itertools::Itertools;
use nom::{
    IResult,
    bytes::complete::{tag, take_till, take_until},
    sequence::{pair, preceded},
};

// Constants ===========================================================================================================

const ORGANISM_MARKER: &str = "OS=";
const FIELD_SEPARATOR: char = '=';
const NAME_WORDS: usize = 2;

// Public API ==========================================================================================================

/// Extracts the organism named by the `OS=` tag of a UniProt-style FASTA description
///
/// The value of the tag runs up to the key of the next `KEY=value` field (or the end of the description), and only
/// its first two words are kept, so strain and serotype annotations are dropped: `OS=Escherichia coli (strain K12)
/// OX=83333` gives `Escherichia coli`. Returns `None` when there is no tag, or when the tag is empty.
#[must_use]
pub fn organism_name(description: &str) -> Option<String> {
    let (rest, value) = organism_field(description).ok()?;

    // NOTE: If another field follows, `value` still ends with that field's key, which needs dropping
    let value = if rest.is_empty() {
        value
    } else {
        value
            .trim_end()
            .rsplit_once(char::is_whitespace)
            .map_or("", |(value, _)| value)
    };

    let name = value.split_whitespace().take(NAME_WORDS).join(" ");
    (!name.is_empty()).then_some(name)
}

// Private Functions ===================================================================================================

fn organism_field(description: &str) -> IResult<&str, &str> {
    preceded(
        pair(take_until(ORGANISM_MARKER), tag(ORGANISM_MARKER)),
        take_till(|c: char| c == FIELD_SEPARATOR),
    )(description)
}

// Module Tests ========================================================================================================
