//! Filter engine - classifies filter tokens once and ANDs them over entries

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use super::Entry;

const SCHOOL_PREFIX: &str = "school=";
const CLASS_PREFIX: &str = "class=";
const MAX_LEVEL: i64 = 9;

/// A classified filter token
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Filter {
    /// `bonus`: casting time mentions a bonus action
    Bonus,
    /// `reaction`: casting time mentions a reaction
    Reaction,
    /// `ritual`
    Ritual,
    /// `concentration`
    Concentration,
    /// `school=<School>`, exact and case-sensitive
    SchoolEquals(String),
    /// `class=<Class>`, exact member of the entry's classes
    ClassContains(String),
    /// `0`..`9`
    LevelEquals(u8),
    /// Anything else. Matches no entry.
    Unrecognized(String),
}

impl Filter {
    /// Classify a raw token
    pub fn parse(token: &str) -> Self {
        match token {
            "bonus" => Filter::Bonus,
            "reaction" => Filter::Reaction,
            "ritual" => Filter::Ritual,
            "concentration" => Filter::Concentration,
            _ => {
                if let Some(school) = token.strip_prefix(SCHOOL_PREFIX) {
                    Filter::SchoolEquals(school.to_string())
                } else if let Some(class) = token.strip_prefix(CLASS_PREFIX) {
                    Filter::ClassContains(class.to_string())
                } else {
                    match token.parse::<i64>() {
                        Ok(level @ 0..=MAX_LEVEL) => Filter::LevelEquals(level as u8),
                        _ => Filter::Unrecognized(token.to_string()),
                    }
                }
            }
        }
    }

    /// Whether this filter keeps `entry`
    pub fn matches(&self, entry: &Entry) -> bool {
        match self {
            Filter::Bonus => entry.cast_time.contains("bonus"),
            Filter::Reaction => entry.cast_time.contains("reaction"),
            Filter::Ritual => entry.ritual,
            Filter::Concentration => entry.concentration,
            Filter::SchoolEquals(school) => entry.school == *school,
            Filter::ClassContains(class) => entry.classes.iter().any(|c| c == class),
            Filter::LevelEquals(level) => entry.level == *level,
            Filter::Unrecognized(_) => false,
        }
    }

    pub fn is_recognized(&self) -> bool {
        !matches!(self, Filter::Unrecognized(_))
    }
}

impl FromStr for Filter {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Filter::parse(s))
    }
}

/// Renders the token the filter was parsed from
impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Filter::Bonus => write!(f, "bonus"),
            Filter::Reaction => write!(f, "reaction"),
            Filter::Ritual => write!(f, "ritual"),
            Filter::Concentration => write!(f, "concentration"),
            Filter::SchoolEquals(school) => write!(f, "{SCHOOL_PREFIX}{school}"),
            Filter::ClassContains(class) => write!(f, "{CLASS_PREFIX}{class}"),
            Filter::LevelEquals(level) => write!(f, "{level}"),
            Filter::Unrecognized(token) => write!(f, "{token}"),
        }
    }
}

/// Keep the entries that match every filter. No filters keeps everything.
pub fn apply<'a, I>(entries: I, filters: &[Filter]) -> Vec<&'a Entry>
where
    I: IntoIterator<Item = &'a Entry>,
{
    entries
        .into_iter()
        .filter(|entry| filters.iter().all(|filter| filter.matches(entry)))
        .collect()
}

/// Ordered, caller-owned list of active filters
///
/// Duplicates are allowed and order is preserved.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterList {
    filters: Vec<Filter>,
}

impl FilterList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Classify `token` and append it. Returns the classified filter.
    pub fn push(&mut self, token: &str) -> &Filter {
        self.filters.push(Filter::parse(token));
        &self.filters[self.filters.len() - 1]
    }

    pub fn clear(&mut self) {
        self.filters.clear();
    }

    /// Replace every filter with the classified `tokens`
    pub fn replace<I, S>(&mut self, tokens: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.filters = tokens
            .into_iter()
            .map(|token| Filter::parse(token.as_ref()))
            .collect();
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Filter> {
        self.filters.iter()
    }

    pub fn as_slice(&self) -> &[Filter] {
        &self.filters
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }
}

impl std::ops::Deref for FilterList {
    type Target = [Filter];

    fn deref(&self) -> &[Filter] {
        &self.filters
    }
}

impl<S: AsRef<str>> FromIterator<S> for FilterList {
    fn from_iter<I: IntoIterator<Item = S>>(tokens: I) -> Self {
        let mut list = FilterList::new();
        list.replace(tokens);
        list
    }
}

impl<'a> IntoIterator for &'a FilterList {
    type Item = &'a Filter;
    type IntoIter = std::slice::Iter<'a, Filter>;

    fn into_iter(self) -> Self::IntoIter {
        self.filters.iter()
    }
}

/// Renders as `[token token ...]`
impl fmt::Display for FilterList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, filter) in self.filters.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{filter}")?;
        }
        write!(f, "]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str, level: u8, school: &str) -> Entry {
        Entry {
            level,
            name: name.to_string(),
            ritual: false,
            school: school.to_string(),
            cast_time: "1 action".to_string(),
            range: "Self".to_string(),
            components: "V".to_string(),
            duration: "Instantaneous".to_string(),
            concentration: false,
            material: None,
            description: String::new(),
            classes: vec!["Wizard".to_string()],
        }
    }

    #[test]
    fn test_classify_keywords() {
        assert_eq!(Filter::parse("bonus"), Filter::Bonus);
        assert_eq!(Filter::parse("reaction"), Filter::Reaction);
        assert_eq!(Filter::parse("ritual"), Filter::Ritual);
        assert_eq!(Filter::parse("concentration"), Filter::Concentration);
    }

    #[test]
    fn test_classify_prefixed_tokens() {
        assert_eq!(
            Filter::parse("school=Evocation"),
            Filter::SchoolEquals("Evocation".to_string())
        );
        assert_eq!(
            Filter::parse("class=Bard"),
            Filter::ClassContains("Bard".to_string())
        );
        assert_eq!(Filter::parse("school="), Filter::SchoolEquals(String::new()));
    }

    #[test]
    fn test_classify_levels() {
        assert_eq!(Filter::parse("0"), Filter::LevelEquals(0));
        assert_eq!(Filter::parse("9"), Filter::LevelEquals(9));
        assert_eq!(Filter::parse("10"), Filter::Unrecognized("10".to_string()));
        assert_eq!(Filter::parse("-1"), Filter::Unrecognized("-1".to_string()));
    }

    #[test]
    fn test_classify_is_exact() {
        assert_eq!(Filter::parse("Ritual"), Filter::Unrecognized("Ritual".to_string()));
        assert_eq!(Filter::parse(" ritual"), Filter::Unrecognized(" ritual".to_string()));
        assert!(!Filter::parse("sorcery").is_recognized());
    }

    #[test]
    fn test_unrecognized_matches_nothing() {
        let e = entry("Fireball", 3, "Evocation");
        assert!(!Filter::parse("typo").matches(&e));
    }

    #[test]
    fn test_cast_time_filters() {
        let mut e = entry("Healing Word", 1, "Evocation");
        e.cast_time = "1 bonus action".to_string();
        assert!(Filter::Bonus.matches(&e));
        assert!(!Filter::Reaction.matches(&e));

        e.cast_time = "1 reaction, which you take when...".to_string();
        assert!(Filter::Reaction.matches(&e));
        assert!(!Filter::Bonus.matches(&e));
    }

    #[test]
    fn test_school_is_case_sensitive() {
        let e = entry("Fireball", 3, "Evocation");
        assert!(Filter::parse("school=Evocation").matches(&e));
        assert!(!Filter::parse("school=evocation").matches(&e));
    }

    #[test]
    fn test_class_membership() {
        let mut e = entry("Bless", 1, "Enchantment");
        e.classes = vec!["Bard".to_string(), "Cleric".to_string()];
        assert!(Filter::parse("class=Cleric").matches(&e));
        assert!(!Filter::parse("class=Wizard").matches(&e));
    }

    #[test]
    fn test_apply_ands_filters() {
        let entries = vec![
            entry("Fireball", 3, "Evocation"),
            entry("Scorching Ray", 2, "Evocation"),
            entry("Counterspell", 3, "Abjuration"),
        ];
        let filters: FilterList = ["school=Evocation", "3"].into_iter().collect();

        let kept = apply(&entries, &filters);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].name, "Fireball");
    }

    #[test]
    fn test_apply_empty_filters_keeps_everything() {
        let entries = vec![entry("A", 1, "X"), entry("B", 2, "Y")];
        assert_eq!(apply(&entries, &[]).len(), 2);
    }

    #[test]
    fn test_filter_list_management() {
        let mut list = FilterList::new();
        assert_eq!(list.push("ritual"), &Filter::Ritual);
        list.push("3");
        list.push("3");
        assert_eq!(list.len(), 3);
        assert_eq!(list.to_string(), "[ritual 3 3]");

        list.replace(["class=Druid"]);
        assert_eq!(list.as_slice(), &[Filter::ClassContains("Druid".to_string())]);

        list.clear();
        assert!(list.is_empty());
        assert_eq!(list.to_string(), "[]");
    }

    #[test]
    fn test_display_round_trips_token_text() {
        for token in ["bonus", "school=Necromancy", "class=Warlock", "7", "whatever"] {
            assert_eq!(Filter::parse(token).to_string(), token);
        }
    }
}
