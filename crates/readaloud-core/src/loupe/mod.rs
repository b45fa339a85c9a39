//! Cursor loupe: resolve the word or label under the pointer and place the
//! magnifier lens next to it.

use alloc::{string::String, vec::Vec};

use heapless::String as BoundedString;

use crate::text_policy::{LABEL_BYTES, is_word_char, truncate_label};

/// Lens edge length in px.
pub const LENS_SIZE: f32 = 256.0;
/// Gap between cursor and lens in px.
pub const LENS_OFFSET: f32 = 20.0;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Text node and char offset under a point.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct CaretHit<'a> {
    pub text: &'a str,
    /// Offset in chars from the start of `text`.
    pub offset: usize,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ElementKind {
    Button,
    Label,
    Link,
    Heading(u8),
    Span,
    Mark,
    Input,
    TextArea,
    Other,
}

impl ElementKind {
    /// Elements whose own text may stand in for a word. Form fields are left
    /// out: their value or placeholder is noise.
    pub const fn shows_label(self) -> bool {
        matches!(
            self,
            Self::Button | Self::Label | Self::Link | Self::Heading(_) | Self::Span | Self::Mark
        )
    }
}

/// Element under a point with its visible text and accessible label.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ElementHit<'a> {
    pub kind: ElementKind,
    pub text: &'a str,
    pub accessible_label: Option<&'a str>,
}

/// Pointer hit-testing provided by the host UI.
pub trait HitTester {
    fn resolve_caret(&self, point: Point) -> Option<CaretHit<'_>>;
    fn resolve_element(&self, point: Point) -> Option<ElementHit<'_>>;
}

/// What the lens shows.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum LoupeTarget {
    Word(String),
    Label(BoundedString<LABEL_BYTES>),
}

impl LoupeTarget {
    pub fn text(&self) -> &str {
        match self {
            Self::Word(word) => word,
            Self::Label(label) => label,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct LoupeView {
    pub target: LoupeTarget,
    pub position: Point,
}

/// Expand `offset` in `text` to the surrounding run of word characters.
///
/// An offset on a non-word char right after a word selects that word.
pub fn word_at(text: &str, offset: usize) -> Option<String> {
    let chars: Vec<char> = text.chars().collect();
    let mut offset = offset.min(chars.len());

    let on_word = chars.get(offset).copied().is_some_and(is_word_char);
    if !on_word && offset > 0 && is_word_char(chars[offset - 1]) {
        offset -= 1;
    }

    let mut start = offset;
    while start > 0 && is_word_char(chars[start - 1]) {
        start -= 1;
    }
    let mut end = offset;
    while end < chars.len() && is_word_char(chars[end]) {
        end += 1;
    }

    let word: String = chars[start..end].iter().collect();
    let word = word.trim();
    (!word.is_empty()).then(|| String::from(word))
}

/// Resolve the lens content under `point`.
pub fn resolve_target<H: HitTester>(hit: &H, point: Point) -> Option<LoupeTarget> {
    if let Some(caret) = hit.resolve_caret(point) {
        return word_at(caret.text, caret.offset).map(LoupeTarget::Word);
    }

    let element = hit.resolve_element(point)?;
    if !element.kind.shows_label() {
        return None;
    }
    let visible = element.text.trim();
    let source = if visible.is_empty() {
        element.accessible_label.unwrap_or("")
    } else {
        visible
    };
    let label = truncate_label(source);
    (!label.is_empty()).then_some(LoupeTarget::Label(label))
}

/// Lens anchor for a cursor, flipped per axis to stay inside the viewport.
pub fn lens_position(cursor: Point, viewport: Viewport) -> Point {
    let mut x = cursor.x + LENS_OFFSET;
    let mut y = cursor.y + LENS_OFFSET;

    if x + LENS_SIZE > viewport.width {
        x = cursor.x - LENS_SIZE - LENS_OFFSET;
    }
    if y + LENS_SIZE > viewport.height {
        y = cursor.y - LENS_SIZE - LENS_OFFSET;
    }

    Point::new(x, y)
}

/// Pointer tracking that exists only while the magnifier is on.
#[derive(Debug)]
pub struct LoupeTracker {
    viewport: Viewport,
    cursor: Option<Point>,
    view: Option<LoupeView>,
}

impl LoupeTracker {
    pub const fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            cursor: None,
            view: None,
        }
    }

    /// Re-place the visible lens for a new viewport.
    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        if let (Some(cursor), Some(view)) = (self.cursor, self.view.as_mut()) {
            view.position = lens_position(cursor, viewport);
        }
    }

    /// Track a pointer move. `None` hides the lens.
    pub fn pointer_moved<H: HitTester>(&mut self, hit: &H, cursor: Point) -> Option<&LoupeView> {
        self.cursor = Some(cursor);
        self.view = resolve_target(hit, cursor).map(|target| LoupeView {
            target,
            position: lens_position(cursor, self.viewport),
        });
        self.view.as_ref()
    }

    pub fn view(&self) -> Option<&LoupeView> {
        self.view.as_ref()
    }
}
