use crate::error::EngineError;

/// One content unit and its 0-based position on the track.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slide<T> {
    pub position: usize,
    pub content: T,
}

/// Ordered, non-empty slide sequence. Built once per (re)initialization and
/// never mutated in place.
#[derive(Debug, Clone)]
pub struct SlideStore<T> {
    slides: Vec<Slide<T>>,
}

impl<T> SlideStore<T> {
    pub fn new(contents: impl IntoIterator<Item = T>) -> Result<Self, EngineError> {
        let slides: Vec<Slide<T>> = contents
            .into_iter()
            .enumerate()
            .map(|(position, content)| Slide { position, content })
            .collect();
        if slides.is_empty() {
            return Err(EngineError::NoSlides);
        }
        Ok(Self { slides })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.slides.len()
    }

    /// A constructed store holds at least one slide.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    #[inline]
    pub fn last_index(&self) -> usize {
        self.slides.len() - 1
    }

    pub fn get(&self, index: usize) -> Option<&Slide<T>> {
        self.slides.get(index)
    }

    pub fn as_slice(&self) -> &[Slide<T>] {
        &self.slides
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positions_follow_input_order() {
        let store = SlideStore::new(["a", "b", "c"]).unwrap();
        assert_eq!(store.len(), 3);
        assert_eq!(store.last_index(), 2);
        assert_eq!(store.get(1).map(|s| (s.position, s.content)), Some((1, "b")));
        assert!(store.get(3).is_none());
    }

    #[test]
    fn empty_input_is_rejected() {
        let err = SlideStore::<u32>::new(Vec::new()).unwrap_err();
        assert_eq!(err, EngineError::NoSlides);
    }
}
