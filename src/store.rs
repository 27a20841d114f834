//! The presentation store: single source of truth for editor state.
//!
//! Holds the live presentation (or none), the active slide index and the
//! last generation result. Every mutation builds a new [`Presentation`]
//! and swaps the shared snapshot; slides are never edited in place.
//!
//! Invalid mutations (nothing loaded, unknown id) are not errors. They
//! come back as [`Outcome::NoOp`] and leave the store untouched.

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::generation::{check_response, GenerationBackend, GenerationFailed};
use crate::types::{
    GenerateRequest, GenerateResponse, GenerationResult, Presentation, Slide, SlideDraft, SlidePatch,
    Theme,
};

// ============================================================================
// OUTCOMES
// ============================================================================

/// Why a mutation did nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoOpReason {
    NoPresentationLoaded,
    SlideNotFound { id: String },
}

/// Result of a store mutation.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// The mutation happened. Carries the new snapshot.
    Applied(Arc<Presentation>),
    /// The mutation was skipped. Store state is unchanged.
    NoOp(NoOpReason),
}

impl Outcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, Outcome::Applied(_))
    }

    pub fn snapshot(&self) -> Option<&Arc<Presentation>> {
        match self {
            Outcome::Applied(p) => Some(p),
            Outcome::NoOp(_) => None,
        }
    }
}

/// A store mutation as data, so pure code can describe what should change.
#[derive(Debug, Clone, PartialEq)]
pub enum StoreCommand {
    AddSlide(SlideDraft),
    UpdateSlide { id: String, patch: SlidePatch },
    DeleteSlide { id: String },
    ChangeTheme(Theme),
    SetCurrentSlide(usize),
}

// ============================================================================
// STORE
// ============================================================================

#[derive(Debug, Default)]
pub struct PresentationStore {
    presentation: Option<Arc<Presentation>>,
    current_slide_index: usize,
    generation: Option<GenerationResult>,
}

impl PresentationStore {
    /// Empty store: no presentation, no generation result.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_presentation(presentation: Presentation) -> Self {
        let mut store = Self::new();
        store.load(presentation);
        store
    }

    // -- Reads --

    pub fn presentation(&self) -> Option<&Presentation> {
        self.presentation.as_deref()
    }

    /// Shared handle to the current snapshot.
    pub fn snapshot(&self) -> Option<Arc<Presentation>> {
        self.presentation.clone()
    }

    pub fn current_slide_index(&self) -> usize {
        self.current_slide_index
    }

    /// Slide at the active index, if the index is in range.
    pub fn current_slide(&self) -> Option<&Slide> {
        self.presentation()?.slides.get(self.current_slide_index)
    }

    pub fn generation(&self) -> Option<&GenerationResult> {
        self.generation.as_ref()
    }

    // -- Lifecycle --

    /// Replace the current presentation and reset the active index.
    pub fn load(&mut self, presentation: Presentation) -> Arc<Presentation> {
        log::debug!(
            "loaded presentation {:?} with {} slides",
            presentation.title,
            presentation.slides.len()
        );
        let snapshot = Arc::new(presentation);
        self.presentation = Some(Arc::clone(&snapshot));
        self.current_slide_index = 0;
        snapshot
    }

    /// Discard the current presentation.
    pub fn clear(&mut self) {
        self.presentation = None;
        self.current_slide_index = 0;
    }

    // -- Mutations --

    /// Append a slide built from `draft` with a fresh id.
    pub fn add_slide(&mut self, draft: SlideDraft) -> Outcome {
        let Some(current) = self.presentation.as_deref() else {
            return no_op(NoOpReason::NoPresentationLoaded);
        };

        let id = fresh_id(&current.slides);
        let mut next = current.clone();
        next.slides.push(draft.into_slide(id));
        self.commit(next)
    }

    /// Shallow-merge `patch` into the slide with this id, keeping its position.
    pub fn update_slide(&mut self, id: &str, patch: &SlidePatch) -> Outcome {
        let Some(current) = self.presentation.as_deref() else {
            return no_op(NoOpReason::NoPresentationLoaded);
        };
        let Some(position) = current.position_of(id) else {
            return no_op(NoOpReason::SlideNotFound { id: id.to_string() });
        };

        let mut next = current.clone();
        next.slides[position] = patch.apply_to(&current.slides[position]);
        self.commit(next)
    }

    /// Remove the first slide with this id.
    ///
    /// The active index is clamped into the remaining range afterwards.
    pub fn delete_slide(&mut self, id: &str) -> Outcome {
        let Some(current) = self.presentation.as_deref() else {
            return no_op(NoOpReason::NoPresentationLoaded);
        };
        let Some(position) = current.position_of(id) else {
            return no_op(NoOpReason::SlideNotFound { id: id.to_string() });
        };

        let mut next = current.clone();
        next.slides.remove(position);
        let last = next.slides.len().saturating_sub(1);
        self.current_slide_index = self.current_slide_index.min(last);
        self.commit(next)
    }

    /// Replace the theme wholesale.
    pub fn change_theme(&mut self, theme: Theme) -> Outcome {
        let Some(current) = self.presentation.as_deref() else {
            return no_op(NoOpReason::NoPresentationLoaded);
        };

        let mut next = current.clone();
        next.theme = theme;
        self.commit(next)
    }

    /// Set the active index. Not validated: callers keep it in range.
    pub fn set_current_slide_index(&mut self, index: usize) {
        self.current_slide_index = index;
    }

    /// Apply a command. `SetCurrentSlide` always sets the index and reports
    /// `NoPresentationLoaded` only when there is nothing to show.
    pub fn apply(&mut self, command: StoreCommand) -> Outcome {
        match command {
            StoreCommand::AddSlide(draft) => self.add_slide(draft),
            StoreCommand::UpdateSlide { id, patch } => self.update_slide(&id, &patch),
            StoreCommand::DeleteSlide { id } => self.delete_slide(&id),
            StoreCommand::ChangeTheme(theme) => self.change_theme(theme),
            StoreCommand::SetCurrentSlide(index) => {
                self.set_current_slide_index(index);
                match &self.presentation {
                    Some(p) => Outcome::Applied(Arc::clone(p)),
                    None => Outcome::NoOp(NoOpReason::NoPresentationLoaded),
                }
            }
        }
    }

    // -- Generation --

    /// One round trip to the generation backend.
    ///
    /// On success the result handles are stored, any previous presentation
    /// is discarded and the full payload is returned. On failure nothing
    /// changes. Generation never builds a presentation.
    pub async fn request_generation(
        &mut self,
        backend: &dyn GenerationBackend,
        topic: &str,
        description: &str,
        theme: &str,
    ) -> Result<GenerateResponse, GenerationFailed> {
        let request = GenerateRequest::new(topic, description, theme);
        let outcome = backend.generate(&request).await;
        self.accept_generation(outcome)
    }

    /// Record the outcome of a generation that ran elsewhere (e.g. on a
    /// background task). Whichever outcome is accepted last wins.
    ///
    /// A success starts over: the previous presentation is discarded.
    /// A failure leaves the store as it was.
    pub fn accept_generation(
        &mut self,
        outcome: Result<GenerateResponse, GenerationFailed>,
    ) -> Result<GenerateResponse, GenerationFailed> {
        let checked = outcome.and_then(check_response);
        match &checked {
            Ok(response) => {
                self.clear();
                self.generation = response.result();
                log::info!("generation succeeded: {:?}", self.generation);
            }
            Err(err) => log::warn!("{}", err),
        }
        checked
    }

    fn commit(&mut self, mut next: Presentation) -> Outcome {
        next.last_edited = Utc::now();
        let snapshot = Arc::new(next);
        self.presentation = Some(Arc::clone(&snapshot));
        log::debug!("presentation now has {} slides", snapshot.slides.len());
        Outcome::Applied(snapshot)
    }
}

fn no_op(reason: NoOpReason) -> Outcome {
    log::debug!("store mutation skipped: {:?}", reason);
    Outcome::NoOp(reason)
}

/// A slide id not used by any of `existing`.
fn fresh_id(existing: &[Slide]) -> String {
    loop {
        let id = Uuid::new_v4().simple().to_string();
        if existing.iter().all(|s| s.id != id) {
            return id;
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::themes;
    use crate::types::Layout;
    use async_trait::async_trait;
    use chrono::DateTime;
    use std::collections::HashSet;

    fn slide(id: &str, title: &str, layout: Layout, content: &[&str]) -> Slide {
        Slide {
            id: id.into(),
            title: title.into(),
            layout,
            content: content.iter().map(|s| s.to_string()).collect(),
            notes: None,
        }
    }

    fn one_slide_deck() -> Presentation {
        Presentation::new(
            "Q1",
            vec![slide("1", "Revenue", Layout::Bullets, &["A", "B"])],
            themes::default_theme(),
        )
    }

    fn three_slide_deck() -> Presentation {
        Presentation::new(
            "Q1",
            vec![
                slide("a", "One", Layout::Title, &["sub"]),
                slide("b", "Two", Layout::Bullets, &["x"]),
                slide("c", "Three", Layout::Quote, &["q", "who"]),
            ],
            themes::default_theme(),
        )
    }

    fn ids(store: &PresentationStore) -> Vec<String> {
        store
            .presentation()
            .unwrap()
            .slides
            .iter()
            .map(|s| s.id.clone())
            .collect()
    }

    struct StubBackend(Result<GenerateResponse, GenerationFailed>);

    #[async_trait]
    impl GenerationBackend for StubBackend {
        async fn generate(
            &self,
            _request: &GenerateRequest,
        ) -> Result<GenerateResponse, GenerationFailed> {
            self.0.clone()
        }
    }

    // -- No presentation --

    #[test]
    fn mutations_without_presentation_are_noops() {
        let mut store = PresentationStore::new();
        let expected = Outcome::NoOp(NoOpReason::NoPresentationLoaded);

        assert_eq!(store.add_slide(SlideDraft::placeholder()), expected);
        assert_eq!(store.update_slide("1", &SlidePatch::default().title("X")), expected);
        assert_eq!(store.delete_slide("1"), expected);
        assert_eq!(store.change_theme(themes::default_theme()), expected);
        assert!(store.presentation().is_none());
    }

    // -- add_slide --

    #[test]
    fn add_slide_appends_with_fresh_id() {
        let mut store = PresentationStore::with_presentation(one_slide_deck());
        let before = store.presentation().unwrap().slides[0].clone();

        let outcome = store.add_slide(SlideDraft::new(
            "New",
            Layout::TextImage,
            vec!["x".into()],
        ));
        assert!(outcome.is_applied());

        let deck = store.presentation().unwrap();
        assert_eq!(deck.slides.len(), 2);
        assert_eq!(deck.slides[0], before);

        let added = &deck.slides[1];
        assert_ne!(added.id, "1");
        assert_eq!(added.title, "New");
        assert_eq!(added.layout, Layout::TextImage);
        assert_eq!(added.content, vec!["x".to_string()]);
    }

    #[test]
    fn repeated_adds_grow_by_one_with_unique_ids() {
        let mut store = PresentationStore::with_presentation(one_slide_deck());
        for n in 0..25 {
            store.add_slide(SlideDraft::placeholder());
            assert_eq!(store.presentation().unwrap().slides.len(), n + 2);
        }
        let all = ids(&store);
        let unique: HashSet<_> = all.iter().collect();
        assert_eq!(unique.len(), all.len());
    }

    #[test]
    fn add_slide_bumps_last_edited() {
        let mut deck = one_slide_deck();
        deck.last_edited = DateTime::<Utc>::UNIX_EPOCH;
        let mut store = PresentationStore::with_presentation(deck);
        store.add_slide(SlideDraft::placeholder());
        assert!(store.presentation().unwrap().last_edited > DateTime::<Utc>::UNIX_EPOCH);
    }

    #[test]
    fn update_slide_bumps_last_edited() {
        let mut deck = one_slide_deck();
        deck.last_edited = DateTime::<Utc>::UNIX_EPOCH;
        let mut store = PresentationStore::with_presentation(deck);
        store.update_slide("1", &SlidePatch::default().title("Costs"));
        assert!(store.presentation().unwrap().last_edited > DateTime::<Utc>::UNIX_EPOCH);
    }

    #[test]
    fn delete_slide_bumps_last_edited() {
        let mut deck = three_slide_deck();
        deck.last_edited = DateTime::<Utc>::UNIX_EPOCH;
        let mut store = PresentationStore::with_presentation(deck);
        store.delete_slide("b");
        assert!(store.presentation().unwrap().last_edited > DateTime::<Utc>::UNIX_EPOCH);
    }

    #[test]
    fn change_theme_bumps_last_edited() {
        let mut deck = one_slide_deck();
        deck.last_edited = DateTime::<Utc>::UNIX_EPOCH;
        let mut store = PresentationStore::with_presentation(deck);
        store.change_theme(themes::find("nature").unwrap());
        assert!(store.presentation().unwrap().last_edited > DateTime::<Utc>::UNIX_EPOCH);
    }

    #[test]
    fn delete_to_empty_resets_index() {
        let mut store = PresentationStore::with_presentation(three_slide_deck());
        store.set_current_slide_index(2);
        for id in ["a", "b", "c"] {
            assert!(store.delete_slide(id).is_applied());
        }
        assert!(store.presentation().unwrap().slides.is_empty());
        assert_eq!(store.current_slide_index(), 0);
        assert!(store.current_slide().is_none());
    }

    #[test]
    fn earlier_snapshots_are_not_mutated() {
        let mut store = PresentationStore::with_presentation(one_slide_deck());
        let before = store.snapshot().unwrap();
        store.add_slide(SlideDraft::placeholder());
        assert_eq!(before.slides.len(), 1);
        assert_eq!(store.presentation().unwrap().slides.len(), 2);
    }

    // -- update_slide --

    #[test]
    fn update_title_touches_only_title() {
        let mut store = PresentationStore::with_presentation(three_slide_deck());
        let before = store.snapshot().unwrap();

        store.update_slide("b", &SlidePatch::default().title("X"));

        let after = store.presentation().unwrap();
        assert_eq!(after.slides[1].title, "X");
        assert_eq!(after.slides[1].layout, before.slides[1].layout);
        assert_eq!(after.slides[1].content, before.slides[1].content);
        assert_eq!(after.slides[0], before.slides[0]);
        assert_eq!(after.slides[2], before.slides[2]);
    }

    #[test]
    fn update_is_idempotent() {
        let mut store = PresentationStore::with_presentation(three_slide_deck());
        let patch = SlidePatch::default().title("X").notes("speak slowly");

        store.update_slide("c", &patch);
        let once = store.presentation().unwrap().slides.clone();
        store.update_slide("c", &patch);
        let twice = store.presentation().unwrap().slides.clone();

        assert_eq!(once, twice);
    }

    #[test]
    fn update_unknown_id_is_noop() {
        let mut store = PresentationStore::with_presentation(three_slide_deck());
        let before = store.snapshot().unwrap();

        let outcome = store.update_slide("zzz", &SlidePatch::default().title("X"));

        assert_eq!(
            outcome,
            Outcome::NoOp(NoOpReason::SlideNotFound { id: "zzz".into() })
        );
        assert_eq!(store.snapshot().unwrap(), before);
    }

    // -- delete_slide --

    #[test]
    fn delete_removes_exactly_one_and_keeps_order() {
        let mut store = PresentationStore::with_presentation(three_slide_deck());
        store.delete_slide("b");
        assert_eq!(ids(&store), vec!["a", "c"]);
    }

    #[test]
    fn delete_removes_only_first_of_duplicate_ids() {
        let mut deck = three_slide_deck();
        deck.slides[2].id = "a".into();
        let mut store = PresentationStore::with_presentation(deck);

        store.delete_slide("a");

        let deck = store.presentation().unwrap();
        assert_eq!(deck.slides.len(), 2);
        assert_eq!(deck.slides[0].title, "Two");
        assert_eq!(deck.slides[1].title, "Three");
    }

    #[test]
    fn delete_unknown_id_leaves_slides_unchanged() {
        let mut store = PresentationStore::with_presentation(three_slide_deck());
        let outcome = store.delete_slide("nope");
        assert!(!outcome.is_applied());
        assert_eq!(ids(&store), vec!["a", "b", "c"]);
    }

    #[test]
    fn delete_clamps_active_index() {
        let mut store = PresentationStore::with_presentation(three_slide_deck());
        store.set_current_slide_index(2);
        store.delete_slide("c");
        assert_eq!(store.current_slide_index(), 1);
        assert_eq!(store.current_slide().unwrap().id, "b");
    }

    #[test]
    fn delete_keeps_in_range_index() {
        let mut store = PresentationStore::with_presentation(three_slide_deck());
        store.set_current_slide_index(1);
        store.delete_slide("a");
        assert_eq!(store.current_slide_index(), 1);
        assert_eq!(store.current_slide().unwrap().id, "c");
    }

    // -- change_theme --

    #[test]
    fn change_theme_replaces_wholesale() {
        let mut store = PresentationStore::with_presentation(three_slide_deck());
        let dark = themes::find("dark").unwrap();

        store.change_theme(dark.clone());

        let deck = store.presentation().unwrap();
        assert_eq!(deck.theme, dark);
        assert_eq!(deck.slides.len(), 3);
    }

    // -- index --

    #[test]
    fn set_index_is_not_validated() {
        let mut store = PresentationStore::with_presentation(one_slide_deck());
        store.set_current_slide_index(9);
        assert_eq!(store.current_slide_index(), 9);
        assert!(store.current_slide().is_none());
    }

    #[test]
    fn load_resets_index_and_clear_discards() {
        let mut store = PresentationStore::with_presentation(three_slide_deck());
        store.set_current_slide_index(2);
        store.load(one_slide_deck());
        assert_eq!(store.current_slide_index(), 0);
        store.clear();
        assert!(store.presentation().is_none());
    }

    // -- apply --

    #[test]
    fn apply_dispatches_commands() {
        let mut store = PresentationStore::with_presentation(three_slide_deck());

        store.apply(StoreCommand::UpdateSlide {
            id: "a".into(),
            patch: SlidePatch::default().layout(Layout::Chart),
        });
        store.apply(StoreCommand::DeleteSlide { id: "b".into() });
        let outcome = store.apply(StoreCommand::SetCurrentSlide(1));

        let deck = outcome.snapshot().unwrap();
        assert_eq!(deck.slides[0].layout, Layout::Chart);
        assert_eq!(deck.slides.len(), 2);
        assert_eq!(store.current_slide_index(), 1);
    }

    #[test]
    fn apply_set_index_without_presentation_still_sets() {
        let mut store = PresentationStore::new();
        let outcome = store.apply(StoreCommand::SetCurrentSlide(3));
        assert_eq!(outcome, Outcome::NoOp(NoOpReason::NoPresentationLoaded));
        assert_eq!(store.current_slide_index(), 3);
    }

    // -- generation --

    #[tokio::test]
    async fn generation_stores_result_and_leaves_presentation_absent() {
        let backend = StubBackend(Ok(GenerateResponse::succeeded("/files/abc.pptx", "abc.pptx")));
        let mut store = PresentationStore::new();

        let response = store
            .request_generation(
                &backend,
                "Q1 Review",
                "three bullet points about revenue",
                "professional",
            )
            .await
            .expect("stub succeeds");

        assert!(response.success);
        assert_eq!(
            store.generation(),
            Some(&GenerationResult {
                download_url: "/files/abc.pptx".into(),
                file_path: "abc.pptx".into(),
            })
        );
        assert!(store.presentation().is_none());
    }

    #[tokio::test]
    async fn failed_generation_keeps_prior_state() {
        let mut store = PresentationStore::new();
        let ok = StubBackend(Ok(GenerateResponse::succeeded("/old", "old.pptx")));
        store.request_generation(&ok, "t", "d", "tech").await.unwrap();
        store.load(one_slide_deck());
        let before = store.snapshot().unwrap();

        let failing = StubBackend(Err(GenerationFailed::Transport("refused".into())));
        let result = store.request_generation(&failing, "t", "d", "tech").await;

        assert!(result.is_err());
        assert_eq!(store.generation().unwrap().file_path, "old.pptx");
        assert_eq!(store.snapshot().unwrap(), before);
    }

    #[tokio::test]
    async fn success_false_from_backend_is_a_failure() {
        let mut response = GenerateResponse::succeeded("/x", "x");
        response.success = false;
        let backend = StubBackend(Ok(response));
        let mut store = PresentationStore::new();

        let result = store.request_generation(&backend, "t", "d", "tech").await;

        assert!(matches!(result, Err(GenerationFailed::Rejected(_))));
        assert!(store.generation().is_none());
    }

    #[test]
    fn successful_generation_discards_loaded_presentation() {
        let mut store = PresentationStore::with_presentation(three_slide_deck());
        store.set_current_slide_index(2);

        store
            .accept_generation(Ok(GenerateResponse::succeeded("/f", "f.pptx")))
            .unwrap();

        assert!(store.presentation().is_none());
        assert_eq!(store.current_slide_index(), 0);
        assert_eq!(store.generation().unwrap().file_path, "f.pptx");
    }

    #[test]
    fn rejected_generation_keeps_loaded_presentation() {
        let mut store = PresentationStore::with_presentation(one_slide_deck());
        let before = store.snapshot().unwrap();

        let result = store.accept_generation(Err(GenerationFailed::Status {
            status: 500,
            message: "down".into(),
        }));

        assert!(result.is_err());
        assert_eq!(store.snapshot().unwrap(), before);
    }

    #[test]
    fn last_accepted_generation_wins() {
        let mut store = PresentationStore::new();
        store
            .accept_generation(Ok(GenerateResponse::succeeded("/first", "first.pptx")))
            .unwrap();
        store
            .accept_generation(Ok(GenerateResponse::succeeded("/second", "second.pptx")))
            .unwrap();
        assert_eq!(store.generation().unwrap().download_url, "/second");
    }
}
