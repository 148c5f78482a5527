//! Identifier generation for pages and sections.

/// Source of uniqueness tokens.
#[derive(Debug)]
enum TokenSource {
    /// Wall clock milliseconds, bumped to stay strictly increasing.
    Clock,
    /// Deterministic counter, for tests and reproducible fixtures.
    Sequence,
}

/// Generates page and section identifiers.
///
/// Tokens are strictly increasing within one generator, so two pages created
/// with the same display name never collide even inside the same millisecond.
#[derive(Debug)]
pub struct IdGenerator {
    source: TokenSource,
    last: u64,
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::clock()
    }
}

impl IdGenerator {
    /// Generator backed by the system clock.
    #[must_use]
    pub fn clock() -> Self {
        Self {
            source: TokenSource::Clock,
            last: 0,
        }
    }

    /// Generator yielding `start`, `start + 1`, ... (tokens start at 1).
    #[must_use]
    pub fn sequence(start: u64) -> Self {
        Self {
            source: TokenSource::Sequence,
            last: start.max(1) - 1,
        }
    }

    /// Next uniqueness token.
    pub fn next_token(&mut self) -> u64 {
        let candidate = match self.source {
            TokenSource::Clock => u64::try_from(chrono::Utc::now().timestamp_millis()).unwrap_or(0),
            TokenSource::Sequence => 0,
        };
        self.last = candidate.max(self.last + 1);
        self.last
    }

    /// Identifier for a new page: the slugified name plus a token.
    pub fn page_id(&mut self, name: &str) -> String {
        format!("{}-{}", slugify(name), self.next_token())
    }

    /// Identifier for a new content section.
    pub fn section_id(&mut self) -> String {
        self.next_token().to_string()
    }
}

/// Lowercase ASCII slug of a display name.
///
/// Runs of non-alphanumeric characters collapse into a single `-`; an
/// empty result becomes `page`.
#[must_use]
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_dash = false;
    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c.to_ascii_lowercase());
        } else {
            pending_dash = true;
        }
    }
    if slug.is_empty() {
        "page".to_owned()
    } else {
        slug
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("About Us"), "about-us");
        assert_eq!(slugify("  Hello,  World! "), "hello-world");
        assert_eq!(slugify("Café 2024"), "caf-2024");
        assert_eq!(slugify("!!!"), "page");
    }

    #[test]
    fn test_sequence_tokens() {
        let mut ids = IdGenerator::sequence(10);

        assert_eq!(ids.next_token(), 10);
        assert_eq!(ids.next_token(), 11);
        assert_eq!(ids.section_id(), "12");
    }

    #[test]
    fn test_same_name_gives_distinct_ids() {
        let mut ids = IdGenerator::clock();

        let first = ids.page_id("News");
        let second = ids.page_id("News");

        assert_ne!(first, second);
        assert!(first.starts_with("news-"));
        assert!(second.starts_with("news-"));
    }

    #[test]
    fn test_clock_tokens_strictly_increase() {
        let mut ids = IdGenerator::clock();
        let tokens: Vec<u64> = (0..100).map(|_| ids.next_token()).collect();

        assert!(tokens.windows(2).all(|w| w[0] < w[1]));
    }
}
