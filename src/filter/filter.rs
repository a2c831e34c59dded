use mongodb::bson::{doc, Bson, Document};

use super::types::{fields, STATUS_AVAILABLE, STATUS_REQUESTED};

/// Conjunction of the listing predicates the API exposes. Renders to a
/// MongoDB filter document and evaluates the same predicate in memory.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FoodFilter {
    status: Option<String>,
    name_contains: Option<String>,
    donator_email: Option<String>,
    user_email: Option<String>,
}

impl FoodFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Listings still up for grabs, optionally narrowed by a name search.
    pub fn available(search: Option<&str>) -> Self {
        let mut filter = Self::new().status(STATUS_AVAILABLE);
        if let Some(search) = search {
            filter = filter.name_contains(search);
        }
        filter
    }

    /// Listings a user has claimed.
    pub fn requested_by(email: &str) -> Self {
        Self::new().requester(email).status(STATUS_REQUESTED)
    }

    /// Listings a donor still has on offer.
    pub fn donated_by(email: &str) -> Self {
        Self::new().donator(email).status(STATUS_AVAILABLE)
    }

    pub fn status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    /// Case-insensitive substring match on `food_name`. Empty needles match everything.
    pub fn name_contains(mut self, needle: &str) -> Self {
        self.name_contains = if needle.is_empty() { None } else { Some(needle.to_string()) };
        self
    }

    pub fn donator(mut self, email: impl Into<String>) -> Self {
        self.donator_email = Some(email.into());
        self
    }

    pub fn requester(mut self, email: impl Into<String>) -> Self {
        self.user_email = Some(email.into());
        self
    }

    pub fn to_document(&self) -> Document {
        let mut filter = Document::new();
        if let Some(email) = &self.user_email {
            filter.insert(fields::USER_EMAIL, email.as_str());
        }
        if let Some(email) = &self.donator_email {
            filter.insert(fields::DONATOR_EMAIL, email.as_str());
        }
        if let Some(status) = &self.status {
            filter.insert(fields::FOOD_STATUS, status.as_str());
        }
        if let Some(needle) = &self.name_contains {
            filter.insert(
                fields::FOOD_NAME,
                doc! { "$regex": escape_regex(needle), "$options": "i" },
            );
        }
        filter
    }

    pub fn matches(&self, document: &Document) -> bool {
        let equals = |field: &str, expected: &Option<String>| match expected {
            Some(expected) => matches!(document.get(field), Some(Bson::String(s)) if s == expected),
            None => true,
        };

        if !equals(fields::USER_EMAIL, &self.user_email)
            || !equals(fields::DONATOR_EMAIL, &self.donator_email)
            || !equals(fields::FOOD_STATUS, &self.status)
        {
            return false;
        }

        match &self.name_contains {
            Some(needle) => match document.get(fields::FOOD_NAME) {
                Some(Bson::String(name)) => name.to_lowercase().contains(&needle.to_lowercase()),
                _ => false,
            },
            None => true,
        }
    }
}

/// Escape regex metacharacters so user input is matched literally.
pub fn escape_regex(input: &str) -> String {
    const META: &[char] = &['\\', '.', '+', '*', '?', '(', ')', '|', '[', ']', '{', '}', '^', '$', '#', '-'];
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        if META.contains(&c) {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn available_filter_document() {
        let filter = FoodFilter::available(Some("Rice")).to_document();
        assert_eq!(
            filter,
            doc! {
                "food_status": "available",
                "food_name": { "$regex": "Rice", "$options": "i" },
            }
        );
    }

    #[test]
    fn empty_search_drops_name_predicate() {
        assert_eq!(FoodFilter::available(Some("")).to_document(), doc! { "food_status": "available" });
        assert_eq!(FoodFilter::available(None), FoodFilter::available(Some("")));
    }

    #[test]
    fn user_filters_pair_email_with_status() {
        assert_eq!(
            FoodFilter::requested_by("a@x.com").to_document(),
            doc! { "user_email": "a@x.com", "food_status": "Requested" }
        );
        assert_eq!(
            FoodFilter::donated_by("a@x.com").to_document(),
            doc! { "donator_email": "a@x.com", "food_status": "available" }
        );
    }

    #[test]
    fn regex_metacharacters_are_escaped() {
        assert_eq!(escape_regex("c++ (v2)"), "c\\+\\+ \\(v2\\)");
        assert_eq!(escape_regex("plain"), "plain");
    }

    #[test]
    fn matches_case_insensitive_substring() {
        let filter = FoodFilter::available(Some("rIcE"));
        assert!(filter.matches(&doc! { "food_name": "Fried Rice", "food_status": "available" }));
        assert!(!filter.matches(&doc! { "food_name": "Fried Rice", "food_status": "Requested" }));
        assert!(!filter.matches(&doc! { "food_name": "Noodles", "food_status": "available" }));
        assert!(!filter.matches(&doc! { "food_status": "available" }));
    }

    #[test]
    fn matches_owner_fields() {
        let doc = doc! { "donator_email": "d@x.com", "user_email": "u@x.com", "food_status": "Requested" };
        assert!(FoodFilter::requested_by("u@x.com").matches(&doc));
        assert!(!FoodFilter::requested_by("d@x.com").matches(&doc));
        assert!(!FoodFilter::donated_by("d@x.com").matches(&doc));
    }
}
