//! Raw query-string parameters.

use url::form_urlencoded;

/// The query-string keys the listing endpoint understands.
///
/// Any other key is carried in [`QueryParams`] but never inspected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecognizedParam {
    PriceMin,
    PriceMax,
    Ids,
    Near,
    Sort,
    Limit,
    Offset,
}

impl RecognizedParam {
    pub const ALL: [Self; 7] = [
        Self::PriceMin,
        Self::PriceMax,
        Self::Ids,
        Self::Near,
        Self::Sort,
        Self::Limit,
        Self::Offset,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::PriceMin => "price_min",
            Self::PriceMax => "price_max",
            Self::Ids => "ids",
            Self::Near => "near",
            Self::Sort => "sort",
            Self::Limit => "limit",
            Self::Offset => "offset",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.as_str() == name)
    }
}

/// Query parameters exactly as they arrived on the request.
///
/// A key may appear more than once. Lookups return the first value, which is
/// what validation and clause building both operate on.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    items: Vec<(String, String)>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode an `application/x-www-form-urlencoded` query string (without the leading `?`).
    pub fn parse(raw_query: &str) -> Self {
        form_urlencoded::parse(raw_query.as_bytes())
            .into_owned()
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// First value for `name`, if the key is present at all.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.items
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// First value of a recognized parameter. An empty value counts as absent.
    pub fn value(&self, param: RecognizedParam) -> Option<&str> {
        self.get(param.as_str()).filter(|v| !v.is_empty())
    }

    /// Keys that are not part of [`RecognizedParam`].
    pub fn unrecognized(&self) -> impl Iterator<Item = &str> {
        self.items
            .iter()
            .map(|(k, _)| k.as_str())
            .filter(|k| RecognizedParam::from_name(k).is_none())
    }
}

impl<K, V> FromIterator<(K, V)> for QueryParams
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            items: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
