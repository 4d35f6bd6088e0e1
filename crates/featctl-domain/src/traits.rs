//! Seams to the host framework's collaborators.

use std::borrow::Cow;
use std::iter::Cloned;
use std::slice;

/// Authorization oracle bound to the current requester.
pub trait PermissionCheck<O: ?Sized> {
    /// Whether the requester holds `permission` on `object`.
    fn is_granted(&self, permission: &str, object: &O) -> bool;
}

impl<O: ?Sized, F> PermissionCheck<O> for F
where
    F: Fn(&str, &O) -> bool,
{
    fn is_granted(&self, permission: &str, object: &O) -> bool {
        self(permission, object)
    }
}

/// Target objects of the current request.
///
/// Every call to [`cursor`](ObjectSource::cursor) starts a fresh forward-only
/// enumeration; the generator opens one cursor per toggled feature and never
/// rewinds it.
pub trait ObjectSource {
    /// The monitored object type.
    type Object;

    /// Forward-only enumeration of the target objects.
    type Cursor<'a>: Iterator<Item = Self::Object>
    where
        Self: 'a;

    /// Starts a new enumeration.
    fn cursor(&self) -> Self::Cursor<'_>;
}

impl<O: Clone> ObjectSource for [O] {
    type Object = O;
    type Cursor<'a> = Cloned<slice::Iter<'a, O>> where Self: 'a;

    fn cursor(&self) -> Self::Cursor<'_> {
        self.iter().cloned()
    }
}

impl<O: Clone> ObjectSource for Vec<O> {
    type Object = O;
    type Cursor<'a> = Cloned<slice::Iter<'a, O>> where Self: 'a;

    fn cursor(&self) -> Self::Cursor<'_> {
        self.iter().cloned()
    }
}

/// Object source re-running a query closure for each enumeration.
///
/// Created by [`from_fn`].
#[derive(Debug, Clone)]
pub struct FromFn<F>(F);

/// Wraps a closure producing a fresh iterator (e.g., a database query) as an
/// [`ObjectSource`].
pub fn from_fn<F, I>(query: F) -> FromFn<F>
where
    F: Fn() -> I,
    I: Iterator,
{
    FromFn(query)
}

impl<F, I> ObjectSource for FromFn<F>
where
    F: Fn() -> I,
    I: Iterator,
{
    type Object = I::Item;
    type Cursor<'a> = I where Self: 'a;

    fn cursor(&self) -> Self::Cursor<'_> {
        (self.0)()
    }
}

/// Locale-aware string lookup for labels and messages.
pub trait Translate {
    /// Translates `text` into the requester's locale.
    fn translate<'a>(&'a self, text: &'a str) -> Cow<'a, str>;
}

/// Passes every string through untranslated.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoTranslation;

impl Translate for NoTranslation {
    fn translate<'a>(&'a self, text: &'a str) -> Cow<'a, str> {
        Cow::Borrowed(text)
    }
}

/// User-facing success banner.
pub trait NotificationSink {
    /// Shows a success message.
    fn success(&mut self, message: &str);
}

impl NotificationSink for Vec<String> {
    fn success(&mut self, message: &str) {
        self.push(message.to_string());
    }
}
