use serde::{Deserialize, Serialize};
use serde_json::Number;
use std::fmt;

/// Identity assigned by the store at creation time.
///
/// The in-memory store hands out a counter, MongoDB an ObjectId rendered
/// as hex. Both serialize as a bare JSON value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AdvertisementId {
    Sequence(u64),
    Opaque(String),
}

impl fmt::Display for AdvertisementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AdvertisementId::Sequence(id) => write!(f, "{}", id),
            AdvertisementId::Opaque(id) => f.write_str(id),
        }
    }
}

/// A stored advertisement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Advertisement {
    pub id: AdvertisementId,
    pub title: String,
    pub description: String,
    pub author: String,
    pub category: String,
    pub tags: Vec<String>,
    /// Kept as the submitted JSON number so `100` does not come back as `100.0`.
    pub price: Number,
}

/// The six business fields of an advertisement, all present.
#[derive(Debug, Clone, PartialEq)]
pub struct NewAdvertisement {
    pub title: String,
    pub description: String,
    pub author: String,
    pub category: String,
    pub tags: Vec<String>,
    pub price: Number,
}

impl NewAdvertisement {
    pub fn with_id(self, id: AdvertisementId) -> Advertisement {
        Advertisement {
            id,
            title: self.title,
            description: self.description,
            author: self.author,
            category: self.category,
            tags: self.tags,
            price: self.price,
        }
    }
}

/// Request body for creating an advertisement.
///
/// Every field is optional at the type level so that an absent field is
/// reported as a missing field instead of a parse failure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateAdvertisement {
    pub title: Option<String>,
    pub description: Option<String>,
    pub author: Option<String>,
    pub category: Option<String>,
    pub tags: Option<Vec<String>>,
    pub price: Option<Number>,
}

impl CreateAdvertisement {
    /// Presence check: strings must be non-empty, `tags` must be supplied and
    /// `price` must be non-zero. Returns the names of every missing field on
    /// failure.
    pub fn validate(self) -> Result<NewAdvertisement, Vec<&'static str>> {
        fn present(value: Option<String>) -> Option<String> {
            value.filter(|v| !v.is_empty())
        }

        let title = present(self.title);
        let description = present(self.description);
        let author = present(self.author);
        let category = present(self.category);
        let price = self.price.filter(|p| p.as_f64() != Some(0.0));

        match (title, description, author, category, self.tags, price) {
            (
                Some(title),
                Some(description),
                Some(author),
                Some(category),
                Some(tags),
                Some(price),
            ) => Ok(NewAdvertisement {
                title,
                description,
                author,
                category,
                tags,
                price,
            }),
            (title, description, author, category, tags, price) => {
                let mut missing = Vec::new();
                if title.is_none() {
                    missing.push("title");
                }
                if description.is_none() {
                    missing.push("description");
                }
                if author.is_none() {
                    missing.push("author");
                }
                if category.is_none() {
                    missing.push("category");
                }
                if tags.is_none() {
                    missing.push("tags");
                }
                if price.is_none() {
                    missing.push("price");
                }
                Err(missing)
            }
        }
    }
}

/// Partial update. Keys that are not business fields (including `id`) are
/// dropped during deserialization.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AdvertisementPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<Number>,
}

impl AdvertisementPatch {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// Overwrite every supplied field on `advertisement`.
    pub fn apply(self, advertisement: &mut Advertisement) {
        if let Some(title) = self.title {
            advertisement.title = title;
        }
        if let Some(description) = self.description {
            advertisement.description = description;
        }
        if let Some(author) = self.author {
            advertisement.author = author;
        }
        if let Some(category) = self.category {
            advertisement.category = category;
        }
        if let Some(tags) = self.tags {
            advertisement.tags = tags;
        }
        if let Some(price) = self.price {
            advertisement.price = price;
        }
    }
}

/// Search criteria; every supplied criterion must hold.
///
/// Text criteria match by case-insensitive substring, each tag must be
/// among the record's tags (case-insensitive).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchFilter {
    pub title: Option<String>,
    pub description: Option<String>,
    pub author: Option<String>,
    pub category: Option<String>,
    pub tags: Vec<String>,
}

impl SearchFilter {
    /// Build a filter from decoded query-string pairs.
    ///
    /// `tags` may repeat and is also accepted as `tags[]`. Empty values and
    /// unknown keys are ignored; a repeated text key keeps its last value.
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut filter = SearchFilter::default();
        for (key, value) in pairs {
            if value.is_empty() {
                continue;
            }
            match key.as_str() {
                "title" => filter.title = Some(value),
                "description" => filter.description = Some(value),
                "author" => filter.author = Some(value),
                "category" => filter.category = Some(value),
                "tags" | "tags[]" => filter.tags.push(value),
                _ => {}
            }
        }
        filter
    }

    pub fn is_empty(&self) -> bool {
        self.text_criteria().next().is_none() && self.tags.is_empty()
    }

    /// Supplied text criteria as `(field, needle)` pairs.
    pub fn text_criteria(&self) -> impl Iterator<Item = (&'static str, &str)> + '_ {
        [
            ("title", self.title.as_deref()),
            ("description", self.description.as_deref()),
            ("author", self.author.as_deref()),
            ("category", self.category.as_deref()),
        ]
        .into_iter()
        .filter_map(|(field, needle)| needle.map(|needle| (field, needle)))
    }

    pub fn matches(&self, advertisement: &Advertisement) -> bool {
        let text_ok = self.text_criteria().all(|(field, needle)| {
            let haystack = match field {
                "title" => &advertisement.title,
                "description" => &advertisement.description,
                "author" => &advertisement.author,
                _ => &advertisement.category,
            };
            haystack.to_lowercase().contains(&needle.to_lowercase())
        });

        text_ok
            && self.tags.iter().all(|wanted| {
                let wanted = wanted.to_lowercase();
                advertisement
                    .tags
                    .iter()
                    .any(|tag| tag.to_lowercase() == wanted)
            })
    }
}
