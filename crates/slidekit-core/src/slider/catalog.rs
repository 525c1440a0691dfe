use serde::{Deserialize, Serialize};

/// A slide as the controller sees it: an identifier plus optional category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slide {
    pub id: usize,
    pub category: Option<String>,
}

impl Slide {
    pub fn new(id: usize) -> Self {
        Self { id, category: None }
    }

    pub fn in_category(id: usize, category: impl Into<String>) -> Self {
        Self {
            id,
            category: Some(category.into()),
        }
    }
}

/// Slides grouped by category tag, in order of first appearance
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryGrouping {
    groups: Vec<(String, Vec<usize>)>,
}

impl CategoryGrouping {
    /// Group slides by category; untagged slides are left out
    pub fn from_slides(slides: &[Slide]) -> Self {
        let mut groups: Vec<(String, Vec<usize>)> = Vec::new();

        for slide in slides {
            let Some(category) = slide.category.as_deref() else {
                tracing::debug!(slide = slide.id, "Slide has no category, skipping");
                continue;
            };
            match groups.iter_mut().find(|(name, _)| name == category) {
                Some((_, ids)) => ids.push(slide.id),
                None => groups.push((category.to_string(), vec![slide.id])),
            }
        }

        Self { groups }
    }

    /// Slide ids for a category
    pub fn get(&self, category: &str) -> Option<&[usize]> {
        self.groups
            .iter()
            .find(|(name, _)| name == category)
            .map(|(_, ids)| ids.as_slice())
    }

    pub fn contains(&self, category: &str) -> bool {
        self.get(category).is_some()
    }

    /// Category names in display order
    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.groups.iter().map(|(name, _)| name.as_str())
    }

    pub fn first(&self) -> Option<&str> {
        self.categories().next()
    }

    /// Category following `current`, wrapping around
    pub fn after(&self, current: &str) -> Option<&str> {
        let pos = self.groups.iter().position(|(name, _)| name == current)?;
        self.groups
            .get((pos + 1) % self.groups.len())
            .map(|(name, _)| name.as_str())
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grouping_keeps_order() {
        let slides = vec![
            Slide::in_category(0, "residential"),
            Slide::in_category(1, "commercial"),
            Slide::in_category(2, "residential"),
            Slide::new(3),
        ];
        let grouping = CategoryGrouping::from_slides(&slides);

        assert_eq!(grouping.len(), 2);
        assert_eq!(grouping.categories().collect::<Vec<_>>(), ["residential", "commercial"]);
        assert_eq!(grouping.get("residential"), Some(&[0, 2][..]));
        assert_eq!(grouping.get("commercial"), Some(&[1][..]));
        assert_eq!(grouping.get("industrial"), None);
    }

    #[test]
    fn test_after_wraps() {
        let slides = vec![Slide::in_category(0, "a"), Slide::in_category(1, "b")];
        let grouping = CategoryGrouping::from_slides(&slides);
        assert_eq!(grouping.after("a"), Some("b"));
        assert_eq!(grouping.after("b"), Some("a"));
        assert_eq!(grouping.after("z"), None);
    }
}
