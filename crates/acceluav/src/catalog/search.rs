//! Site-wide search.

use serde::Serialize;

use super::records::{BlogPost, Hackathon, Job, Leader, NewsItem, Product};

/// Text the software hub page is found by.
const SOFTWARE_KEYWORDS: &str = "rltm software rapid live tactical mapping";

/// Matches across every searchable collection.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SearchResults<'a> {
    /// Title, description or category matched.
    pub products: Vec<&'a Product>,
    /// Title, description or department matched.
    pub jobs: Vec<&'a Job>,
    /// Name, role or bio matched.
    pub leaders: Vec<&'a Leader>,
    /// Title, excerpt or content matched.
    pub blogs: Vec<&'a BlogPost>,
    /// Title, excerpt or category matched.
    pub news: Vec<&'a NewsItem>,
    /// Title, description or venue matched.
    pub hackathons: Vec<&'a Hackathon>,
    /// Whether the software hub page matches.
    pub software: bool,
}

impl SearchResults<'_> {
    /// Total number of hits, counting the software page as one.
    #[must_use]
    pub fn total(&self) -> usize {
        self.products.len()
            + self.jobs.len()
            + self.leaders.len()
            + self.blogs.len()
            + self.news.len()
            + self.hackathons.len()
            + usize::from(self.software)
    }

    /// Whether nothing matched.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}

/// Lower-cased query matched as a plain substring.
#[derive(Debug, Clone)]
pub(crate) struct Needle(String);

impl Needle {
    pub(crate) fn new(query: &str) -> Self {
        Self(query.to_lowercase())
    }

    pub(crate) fn in_any(&self, fields: &[&str]) -> bool {
        fields
            .iter()
            .any(|field| field.to_lowercase().contains(&self.0))
    }

    pub(crate) fn matches_software(&self) -> bool {
        SOFTWARE_KEYWORDS.contains(&self.0)
    }
}

/// Collections searched by [`search`].
#[derive(Debug, Clone, Copy)]
pub(crate) struct Haystack<'a> {
    pub products: &'a [Product],
    pub jobs: &'a [Job],
    pub leaders: &'a [Leader],
    pub blogs: &'a [BlogPost],
    pub news: &'a [NewsItem],
    pub hackathons: &'a [Hackathon],
}

/// Case-insensitive substring search.
pub(crate) fn search<'a>(haystack: &Haystack<'a>, query: &str) -> SearchResults<'a> {
    let needle = Needle::new(query);

    SearchResults {
        products: haystack
            .products
            .iter()
            .filter(|p| {
                needle.in_any(&[
                    p.title.as_str(),
                    p.description.as_str(),
                    p.category.as_str(),
                ])
            })
            .collect(),
        jobs: haystack
            .jobs
            .iter()
            .filter(|j| {
                needle.in_any(&[
                    j.title.as_str(),
                    j.description.as_str(),
                    j.department.as_str(),
                ])
            })
            .collect(),
        leaders: haystack
            .leaders
            .iter()
            .filter(|l| {
                needle.in_any(&[
                    l.name.as_str(),
                    l.role.as_str(),
                    l.bio.as_str(),
                ])
            })
            .collect(),
        blogs: haystack
            .blogs
            .iter()
            .filter(|b| {
                needle.in_any(&[
                    b.title.as_str(),
                    b.excerpt.as_str(),
                    b.content.as_str(),
                ])
            })
            .collect(),
        news: haystack
            .news
            .iter()
            .filter(|n| {
                needle.in_any(&[
                    n.title.as_str(),
                    n.excerpt.as_str(),
                    n.category.as_str(),
                ])
            })
            .collect(),
        hackathons: haystack
            .hackathons
            .iter()
            .filter(|h| {
                needle.in_any(&[
                    h.title.as_str(),
                    h.description.as_str(),
                    h.venue.as_str(),
                ])
            })
            .collect(),
        software: needle.matches_software(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_needle_is_case_insensitive() {
        let needle = Needle::new("VtOl");
        assert!(needle.in_any(&["Hybrid VTOL UAV"]));
        assert!(!needle.in_any(&["Fixed wing", "Quadcopter"]));
    }

    #[test]
    fn test_software_keywords() {
        assert!(Needle::new("Tactical").matches_software());
        assert!(Needle::new("rapid live").matches_software());
        assert!(!Needle::new("hexacopter").matches_software());
    }

    #[test]
    fn test_empty_needle_matches_everything() {
        let needle = Needle::new("");
        assert!(needle.in_any(&["anything"]));
        assert!(needle.matches_software());
    }

    #[test]
    fn test_total_counts_software_once() {
        let results = SearchResults {
            software: true,
            ..SearchResults::default()
        };
        assert_eq!(results.total(), 1);
        assert!(!results.is_empty());
        assert!(SearchResults::default().is_empty());
    }
}
