use std::collections::HashSet;

/// Used when a desired name is blank or mangles down to nothing.
pub const FALLBACK_NAME: &str = "object";

/// Hands out export names that are unique ignoring case.
///
/// The allocator owns only the uniqueness loop. How a name is spelled, and how a
/// numbered variant is formed, is up to the `mangle` function passed to
/// [`NameAllocator::allocate`], which receives the base name and `None` for the
/// first attempt, then `Some(2)`, `Some(3)`, ... until a free candidate appears.
#[derive(Debug, Default, Clone)]
pub struct NameAllocator {
    taken: HashSet<String>,
}

impl NameAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// An allocator whose taken set starts out holding `reserved`.
    pub fn with_reserved<I, S>(reserved: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut allocator = Self::new();
        for word in reserved {
            allocator.reserve(word.as_ref());
        }
        allocator
    }

    /// Mark a name as taken without allocating it.
    pub fn reserve(&mut self, name: &str) {
        self.taken.insert(fold(name));
    }

    pub fn is_taken(&self, name: &str) -> bool {
        self.taken.contains(&fold(name))
    }

    pub fn allocate<F>(&mut self, desired: &str, mut mangle: F) -> String
    where
        F: FnMut(&str, Option<u32>) -> String,
    {
        let mut base = desired.trim();
        if base.is_empty() {
            base = FALLBACK_NAME;
        }

        let mut candidate = mangle(base, None);
        if candidate.is_empty() {
            base = FALLBACK_NAME;
            candidate = mangle(base, None);
        }

        let mut index: u32 = 2;
        while candidate.is_empty() || self.is_taken(&candidate) {
            candidate = mangle(base, Some(index));
            if candidate.is_empty() {
                candidate = format!("{}{}", FALLBACK_NAME, index);
            }
            index += 1;
        }

        self.reserve(&candidate);
        candidate
    }
}

fn fold(name: &str) -> String {
    name.to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbered(base: &str, suffix: Option<u32>) -> String {
        match suffix {
            Some(n) => format!("{}{}", base, n),
            None => base.to_string(),
        }
    }

    #[test]
    fn first_request_gets_the_base_name() {
        let mut names = NameAllocator::new();
        assert_eq!(names.allocate("Kitchen", numbered), "Kitchen");
        assert!(names.is_taken("kitchen"));
    }

    #[test]
    fn collisions_ignore_case_and_count_from_two() {
        let mut names = NameAllocator::new();
        assert_eq!(names.allocate("Hall", numbered), "Hall");
        assert_eq!(names.allocate("HALL", numbered), "HALL2");
        assert_eq!(names.allocate("hall", numbered), "hall3");
    }

    #[test]
    fn reserved_words_are_never_handed_out() {
        let mut names = NameAllocator::with_reserved(["Object", "room"]);
        assert_eq!(names.allocate("ROOM", numbered), "ROOM2");
        // blank names fall back to "object", which is reserved here too
        assert_eq!(names.allocate("   ", numbered), "object2");
    }

    #[test]
    fn blank_or_fully_mangled_names_use_the_fallback() {
        let mut names = NameAllocator::new();
        assert_eq!(names.allocate("", numbered), "object");

        let strip = |base: &str, suffix: Option<u32>| {
            let kept: String = base.chars().filter(|c| c.is_alphabetic()).collect();
            numbered(&kept, suffix)
        };
        assert_eq!(names.allocate("???", strip), "object2");
    }

    #[test]
    fn many_duplicates_stay_pairwise_distinct() {
        let mut names = NameAllocator::with_reserved(["lamp"]);
        let mut seen = HashSet::new();
        for i in 0..50 {
            let desired = if i % 2 == 0 { "Lamp" } else { "lAMP" };
            let name = names.allocate(desired, numbered);
            assert!(seen.insert(name.to_lowercase()), "duplicate name {}", name);
            assert_ne!(name.to_lowercase(), "lamp");
        }
    }
}
