//! Analysis results for a single URL.

/// The SEO tags extracted from a page.
///
/// Every tag is optional; the service reports `null` for tags the page does
/// not declare.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SeoTags {
    pub title: Option<String>,
    pub meta_description: Option<String>,
    pub canonical_url: Option<String>,
    pub og_title: Option<String>,
    pub og_description: Option<String>,
    pub og_image: Option<String>,
    pub og_url: Option<String>,
    pub twitter_card: Option<String>,
    pub twitter_title: Option<String>,
    pub twitter_description: Option<String>,
    pub twitter_image: Option<String>,
}

/// Identifies one of the eleven tags in [`SeoTags`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SeoTag {
    Title,
    MetaDescription,
    CanonicalUrl,
    OgTitle,
    OgDescription,
    OgUrl,
    OgImage,
    TwitterCard,
    TwitterTitle,
    TwitterDescription,
    TwitterImage,
}

impl SeoTag {
    /// All tags in display order.
    pub const ALL: [SeoTag; 11] = [
        SeoTag::Title,
        SeoTag::MetaDescription,
        SeoTag::CanonicalUrl,
        SeoTag::OgTitle,
        SeoTag::OgDescription,
        SeoTag::OgUrl,
        SeoTag::OgImage,
        SeoTag::TwitterCard,
        SeoTag::TwitterTitle,
        SeoTag::TwitterDescription,
        SeoTag::TwitterImage,
    ];

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            SeoTag::Title => "Title",
            SeoTag::MetaDescription => "Meta Description",
            SeoTag::CanonicalUrl => "Canonical URL",
            SeoTag::OgTitle => "OG Title",
            SeoTag::OgDescription => "OG Description",
            SeoTag::OgUrl => "OG URL",
            SeoTag::OgImage => "OG Image",
            SeoTag::TwitterCard => "Twitter Card",
            SeoTag::TwitterTitle => "Twitter Title",
            SeoTag::TwitterDescription => "Twitter Description",
            SeoTag::TwitterImage => "Twitter Image",
        }
    }
}

impl SeoTags {
    /// Look up the value of a single tag.
    pub fn get(&self, tag: SeoTag) -> Option<&str> {
        let value = match tag {
            SeoTag::Title => &self.title,
            SeoTag::MetaDescription => &self.meta_description,
            SeoTag::CanonicalUrl => &self.canonical_url,
            SeoTag::OgTitle => &self.og_title,
            SeoTag::OgDescription => &self.og_description,
            SeoTag::OgUrl => &self.og_url,
            SeoTag::OgImage => &self.og_image,
            SeoTag::TwitterCard => &self.twitter_card,
            SeoTag::TwitterTitle => &self.twitter_title,
            SeoTag::TwitterDescription => &self.twitter_description,
            SeoTag::TwitterImage => &self.twitter_image,
        };
        value.as_deref().filter(|v| !v.is_empty())
    }

    /// Iterate over every tag and its value in display order.
    ///
    /// Empty strings are reported as `None`.
    pub fn entries(&self) -> impl Iterator<Item = (SeoTag, Option<&str>)> + '_ {
        SeoTag::ALL.into_iter().map(move |tag| (tag, self.get(tag)))
    }

    /// Number of tags that carry a non-empty value.
    pub fn present_count(&self) -> usize {
        self.entries().filter(|(_, v)| v.is_some()).count()
    }
}

/// How the page would appear in a Google result.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GooglePreview {
    pub title: String,
    pub snippet: String,
}

/// How the page would appear when shared on social networks.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SocialPreview {
    pub title: String,
    pub description: String,
}

/// The full output of one backend analysis of a URL.
///
/// # Example
///
/// ```rust
/// use sitescope_types::AnalysisResult;
///
/// let result = AnalysisResult {
///     url: "https://example.com".to_string(),
///     status_code: 200,
///     load_time_ms: 812.4,
///     ..Default::default()
/// };
///
/// assert!(result.is_success());
/// assert!(!result.has_issues());
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AnalysisResult {
    /// The final URL that was analyzed (after redirects).
    pub url: String,
    /// HTTP status code returned by the analyzed site.
    pub status_code: u16,
    /// Time taken to fetch the page, in milliseconds.
    pub load_time_ms: f64,
    pub seo_tags: SeoTags,
    /// SEO problems found, in the order the service reported them.
    pub issues: Vec<String>,
    pub ai_feedback: String,
    pub google_preview: GooglePreview,
    pub social_preview: SocialPreview,
}

impl AnalysisResult {
    /// Returns true if the analyzed site answered with a 2xx status.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status_code)
    }

    /// Returns true if the service reported at least one SEO issue.
    pub fn has_issues(&self) -> bool {
        !self.issues.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_tags_are_reported_missing() {
        let tags = SeoTags {
            title: Some("Example".to_string()),
            meta_description: Some(String::new()),
            ..Default::default()
        };

        assert_eq!(tags.get(SeoTag::Title), Some("Example"));
        assert_eq!(tags.get(SeoTag::MetaDescription), None);
        assert_eq!(tags.present_count(), 1);
    }

    #[test]
    fn test_entries_follow_display_order() {
        let tags = SeoTags::default();
        let labels: Vec<&str> = tags.entries().map(|(t, _)| t.label()).collect();

        assert_eq!(labels.len(), 11);
        assert_eq!(labels[0], "Title");
        assert_eq!(labels[5], "OG URL");
        assert_eq!(labels[10], "Twitter Image");
    }

    #[test]
    fn test_status_classification() {
        let mut result = AnalysisResult {
            status_code: 204,
            ..Default::default()
        };
        assert!(result.is_success());

        result.status_code = 404;
        assert!(!result.is_success());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_deserialize_service_payload() {
        let json = r#"{
            "url": "https://example.com",
            "status_code": 200,
            "load_time_ms": 812.4,
            "seo_tags": { "title": "Example Domain", "og_image": null },
            "issues": ["Missing meta description"],
            "ai_feedback": "Add a description.",
            "google_preview": { "title": "Example Domain", "snippet": "..." },
            "social_preview": { "title": "Example Domain", "description": "..." }
        }"#;

        let result: AnalysisResult = serde_json::from_str(json).unwrap();
        assert_eq!(result.url, "https://example.com");
        assert_eq!(result.load_time_ms, 812.4);
        assert_eq!(result.seo_tags.title.as_deref(), Some("Example Domain"));
        assert!(result.seo_tags.twitter_card.is_none());
        assert_eq!(result.issues, vec!["Missing meta description".to_string()]);
    }
}
