//! Line cleaning for free-text completions.
//!
//! A [`LineCleaner`] is an ordered list of named string-to-string steps. The
//! standard pipeline is:
//!
//! 1. `leading_punct`: leading runs of brackets, quotes, dashes and spaces
//! 2. `trailing_punct`: trailing runs of brackets, quotes, spaces and commas
//! 3. `edge_quote`: one leading and one trailing double quote
//! 4. `price`: `<digits><currency>` and everything after it
//! 5. `ordinal`: a leading `<digits>.` list marker
//!
//! Steps can be inserted at any index without disturbing the others.

use once_cell::sync::Lazy;
use regex::Regex;

/// Currency suffix used by [`LineCleaner::default`].
pub const DEFAULT_CURRENCY_SUFFIX: &str = "원";

static LEADING_PUNCT: Lazy<Regex> = Lazy::new(|| Regex::new(r#"^[\[\]"\-\s]+"#).unwrap());
static TRAILING_PUNCT: Lazy<Regex> = Lazy::new(|| Regex::new(r#"[\[\]"\s,]+$"#).unwrap());
static EDGE_QUOTE: Lazy<Regex> = Lazy::new(|| Regex::new(r#"^"|"$"#).unwrap());
static ORDINAL: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]+\.\s*").unwrap());
static DEFAULT_PRICE: Lazy<Regex> =
    Lazy::new(|| price_pattern(DEFAULT_CURRENCY_SUFFIX).unwrap());
static DIGITS_ONLY: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]+$").unwrap());

const FENCE: &str = "```";

/// One cleaning step.
pub type CleanFn = Box<dyn Fn(&str) -> String + Send + Sync>;

struct Step {
    name: String,
    apply: CleanFn,
}

pub struct LineCleaner {
    steps: Vec<Step>,
}

impl LineCleaner {
    /// A cleaner with no steps.
    pub fn empty() -> Self {
        Self { steps: Vec::new() }
    }

    /// The standard pipeline with a custom currency suffix.
    ///
    /// An empty suffix drops the price step rather than stripping at the first digit.
    pub fn with_currency(suffix: &str) -> Result<Self, regex::Error> {
        let price = if suffix.is_empty() {
            None
        } else {
            Some(price_pattern(suffix)?)
        };
        Ok(Self::standard(price))
    }

    fn standard(price: Option<Regex>) -> Self {
        let mut cleaner = Self::empty()
            .with_step("leading_punct", strip(&LEADING_PUNCT))
            .with_step("trailing_punct", strip(&TRAILING_PUNCT))
            .with_step("edge_quote", strip(&EDGE_QUOTE));
        if let Some(price) = price {
            cleaner = cleaner.with_step("price", strip(&price));
        }
        cleaner.with_step("ordinal", strip(&ORDINAL))
    }

    /// Append a step.
    pub fn with_step(mut self, name: impl Into<String>, apply: CleanFn) -> Self {
        self.steps.push(Step {
            name: name.into(),
            apply,
        });
        self
    }

    /// Insert a step at `index` (clamped to the end).
    pub fn insert_step(&mut self, index: usize, name: impl Into<String>, apply: CleanFn) {
        let index = index.min(self.steps.len());
        self.steps.insert(
            index,
            Step {
                name: name.into(),
                apply,
            },
        );
    }

    /// Insert a step right after the step called `after`, or at the end if none matches.
    pub fn insert_after(&mut self, after: &str, name: impl Into<String>, apply: CleanFn) {
        let index = self
            .steps
            .iter()
            .position(|s| s.name == after)
            .map_or(self.steps.len(), |i| i + 1);
        self.insert_step(index, name, apply);
    }

    pub fn step_names(&self) -> Vec<&str> {
        self.steps.iter().map(|s| s.name.as_str()).collect()
    }

    /// Run every step once, in order, on a trimmed line.
    pub fn clean_once(&self, line: &str) -> String {
        self.steps
            .iter()
            .fold(line.trim().to_string(), |acc, step| (step.apply)(&acc))
    }

    /// Run the pipeline until the line stops changing, so cleaning an
    /// already-cleaned line is a no-op.
    pub fn clean(&self, line: &str) -> String {
        let mut current = self.clean_once(line);
        loop {
            let next = self.clean_once(&current);
            if next == current {
                return current;
            }
            // Standard steps only delete text, so the line shrinks every pass.
            // A custom step that rewrites without shrinking ends the loop here.
            let shrank = next.len() < current.len();
            current = next;
            if !shrank {
                return current;
            }
        }
    }
}

impl Default for LineCleaner {
    fn default() -> Self {
        Self::standard(Some(Regex::clone(&DEFAULT_PRICE)))
    }
}

/// Whether a cleaned line is worth keeping as an item.
pub fn is_item(cleaned: &str) -> bool {
    !cleaned.is_empty()
        && cleaned != ","
        && cleaned != "["
        && cleaned != "]"
        && !cleaned.starts_with(FENCE)
        && !DIGITS_ONLY.is_match(cleaned)
}

/// A step that deletes every match of `re`.
pub fn strip(re: &Regex) -> CleanFn {
    let re = re.clone();
    Box::new(move |s: &str| re.replace_all(s, "").into_owned())
}

fn price_pattern(suffix: &str) -> Result<Regex, regex::Error> {
    Regex::new(&format!(r"\s*[0-9]+{}.*$", regex::escape(suffix)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_step_order() {
        assert_eq!(
            LineCleaner::default().step_names(),
            vec!["leading_punct", "trailing_punct", "edge_quote", "price", "ordinal"]
        );
    }

    #[test]
    fn strips_ordinal_and_price() {
        let cleaner = LineCleaner::default();
        assert_eq!(cleaner.clean("1. Kimchi 8000원"), "Kimchi");
        assert_eq!(cleaner.clean("12.Bulgogi 15000원 (2인분)"), "Bulgogi");
    }

    #[test]
    fn strips_json_array_punctuation() {
        let cleaner = LineCleaner::default();
        assert_eq!(cleaner.clean(r#"  "Bibimbap","#), "Bibimbap");
        assert_eq!(cleaner.clean(r#"["Japchae""#), "Japchae");
        assert_eq!(cleaner.clean("- Tteokbokki"), "Tteokbokki");
    }

    #[test]
    fn clean_is_idempotent() {
        let cleaner = LineCleaner::default();
        for line in [
            "1. Kimchi 8000원",
            r#""Tea" 3000원"#,
            r#"  - "Soju","#,
            "1. 2. Sundubu",
            "Cold noodles",
        ] {
            let once = cleaner.clean(line);
            assert_eq!(cleaner.clean(&once), once, "line {line:?}");
        }
    }

    #[test]
    fn long_ordinal_chains_clean_fully() {
        let cleaner = LineCleaner::default();
        let line = "1. 2. 3. 4. 5. 6. 7. 8. 9. 10. 11. 12. Kimchi";
        let cleaned = cleaner.clean(line);
        assert_eq!(cleaned, "Kimchi");
        assert_eq!(cleaner.clean(&cleaned), cleaned);
    }

    #[test]
    fn growing_custom_step_still_terminates() {
        let cleaner = LineCleaner::empty().with_step("suffix", Box::new(|s: &str| format!("{s}!")));
        assert_eq!(cleaner.clean("Tea"), "Tea!!");
    }

    #[test]
    fn keeps_inner_text_untouched() {
        let cleaner = LineCleaner::default();
        assert_eq!(cleaner.clean("Pork & Kimchi Stew"), "Pork & Kimchi Stew");
    }

    #[test]
    fn custom_currency_suffix() {
        let cleaner = LineCleaner::with_currency("$").unwrap();
        assert_eq!(cleaner.clean("Burger 12$ with fries"), "Burger");
        assert_eq!(cleaner.clean("Kimchi 8000원"), "Kimchi 8000원");
    }

    #[test]
    fn empty_currency_drops_price_step() {
        let cleaner = LineCleaner::with_currency("").unwrap();
        assert!(!cleaner.step_names().contains(&"price"));
        assert_eq!(cleaner.clean("Set 2 for 1"), "Set 2 for 1");
    }

    #[test]
    fn inserted_step_runs_in_position() {
        let mut cleaner = LineCleaner::default();
        let asterisks = Regex::new(r"^\*+\s*").unwrap();
        cleaner.insert_after("leading_punct", "markdown_bullet", strip(&asterisks));
        assert_eq!(
            cleaner.step_names(),
            vec!["leading_punct", "markdown_bullet", "trailing_punct", "edge_quote", "price", "ordinal"]
        );
        assert_eq!(cleaner.clean("** Galbi 30000원"), "Galbi");
    }

    #[test]
    fn item_filter() {
        assert!(is_item("Kimchi"));
        assert!(!is_item(""));
        assert!(!is_item(","));
        assert!(!is_item("["));
        assert!(!is_item("]"));
        assert!(!is_item("8000"));
        assert!(!is_item("```"));
        assert!(!is_item("```json"));
    }
}
