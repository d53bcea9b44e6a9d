/*!
 * Tests for surname extraction
 */

use bibsort::sort_key::{extract_key, surname_from_author_line, surname_from_label, KeyStrategy, SortKey};
use bibsort::bibliography::BibliographyEntry;

/// Test the et al. label form
#[test]
fn test_extractKey_withEtAlLabel_shouldReturnFirstAuthor() {
    let key = extract_key("\\bibitem[Song et al.(2024)]{song2024}\nSong, T., Rizvi, M. ...");

    assert_eq!(key.value, "Song");
    assert_eq!(key.strategy, KeyStrategy::BracketLabel);
}

/// Test a single surname directly followed by the year
#[test]
fn test_extractKey_withSurnameTouchingYear_shouldReturnSurname() {
    let key = extract_key("\\bibitem[Russell(2019)]{russell2019}\nRussell, B. ...");

    assert_eq!(key.value, "Russell");
    assert_eq!(key.strategy, KeyStrategy::BracketLabel);
}

/// Test that a trailing comma is stripped from the first label token
#[test]
fn test_extractKey_withCommaInLabel_shouldStripComma() {
    let key = extract_key("\\bibitem[Rizvi, M.(2023)]{rizvi2023}\nRizvi, M. ...");
    assert_eq!(key.value, "Rizvi");
}

/// Test that trailing periods are stripped as well
#[test]
fn test_surnameFromLabel_withTrailingPeriod_shouldStripIt() {
    assert_eq!(surname_from_label("\\bibitem[Smith. and Jones(1999)]{s}").as_deref(), Some("Smith"));
}

/// Test the label form without the closing bracket
#[test]
fn test_surnameFromLabel_withParenthesisThenBrace_shouldMatch() {
    assert_eq!(surname_from_label("\\bibitem[Lee(2010){lee}\nLee, K.").as_deref(), Some("Lee"));
}

/// Test the author line fallback when the label carries no year
#[test]
fn test_extractKey_withoutBracketYear_shouldUseAuthorLine() {
    let key = extract_key("\\bibitem[Hamdi]{hamdi2022}\nHamdi, M., Song, T.\nTitle.");

    assert_eq!(key.value, "Hamdi");
    assert_eq!(key.strategy, KeyStrategy::AuthorLine);
}

/// Test that indentation before the author line is skipped
#[test]
fn test_surnameFromAuthorLine_withIndentation_shouldTrim() {
    assert_eq!(surname_from_author_line("{key}\n    Hamdi, M., ...").as_deref(), Some("Hamdi"));
}

/// Test that the captured author text is used as a whole
#[test]
fn test_surnameFromAuthorLine_withMultiWordSurname_shouldKeepWholeCapture() {
    assert_eq!(
        surname_from_author_line("{vdb}\nVan der Berg, A., ...").as_deref(),
        Some("Van der Berg")
    );
}

/// Test that an author line without a comma does not borrow one from a later line
#[test]
fn test_surnameFromAuthorLine_withCommaOnLaterLine_shouldReturnNone() {
    let text = "\\bibitem[Smith]{smith}\nJ. Smith and K. Lee. Deep things.\n\\newblock Journal, 2020.";

    assert_eq!(surname_from_author_line(text), None);

    let key = extract_key(text);
    assert_eq!(key.strategy, KeyStrategy::RawText);
    assert_eq!(key.value, text);
}

/// Test that blank lines before the author line are still skipped
#[test]
fn test_surnameFromAuthorLine_withBlankLineBeforeAuthors_shouldReturnSurname() {
    assert_eq!(surname_from_author_line("{key}\n\n  Hamdi, M.").as_deref(), Some("Hamdi"));
}

/// Test that unmatched entries fall back to the raw text
#[test]
fn test_extractKey_withNoPattern_shouldUseRawText() {
    let text = "\\bibitem[Anon]{anon} Untitled pamphlet";
    let key = extract_key(text);

    assert_eq!(key.value, text);
    assert_eq!(key.strategy, KeyStrategy::RawText);
}

/// Test that extraction never yields an empty key
#[test]
fn test_extractKey_withOddInputs_shouldNeverBeEmpty() {
    let inputs = [
        "\\bibitem[",
        "\\bibitem[(2020)]{x}",
        "\\bibitem[ ]{x}\n , ,",
        "}\n,",
        "\\bibitem[.,(2000)]{x}\nAuthor, A.",
    ];

    for input in inputs {
        assert!(!extract_key(input).value.is_empty(), "empty key for {:?}", input);
    }
}

/// Test that a label made only of punctuation falls through to the author line
#[test]
fn test_extractKey_withPunctuationLabel_shouldFallThrough() {
    let key = extract_key("\\bibitem[.,(2000)]{x}\nAuthor, A.");

    assert_eq!(key.value, "Author");
    assert_eq!(key.strategy, KeyStrategy::AuthorLine);
}

/// Test that the key keeps its case and normalizes for comparison only
#[test]
fn test_sortKey_normalized_shouldLowercaseWithoutChangingValue() {
    let key = SortKey::new("McDonald", KeyStrategy::BracketLabel);

    assert_eq!(key.normalized(), "mcdonald");
    assert_eq!(key.value, "McDonald");
    assert_eq!(key.to_string(), "McDonald");
}

/// Test that entries expose their key
#[test]
fn test_entrySortKey_shouldMatchExtractKey() {
    let entry = BibliographyEntry::new("\\bibitem[Song et al.(2024)]{song2024}\nSong, T.");
    assert_eq!(entry.sort_key(), extract_key(entry.text()));
}

/// Test strategy identifiers
#[test]
fn test_keyStrategy_display_shouldUseShortNames() {
    assert_eq!(KeyStrategy::BracketLabel.to_string(), "label");
    assert_eq!(KeyStrategy::AuthorLine.to_string(), "author-line");
    assert_eq!(KeyStrategy::RawText.to_string(), "raw");
}
