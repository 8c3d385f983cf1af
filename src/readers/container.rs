//! Size-driven repetition of a child reader into a container

use super::{ChildReader, ChildReaderExt, MapReader};
use crate::context::Context;
use crate::error::{ReadError, Result};
use indexmap::IndexSet;
use std::collections::{BTreeSet, HashSet, VecDeque};
use std::hash::Hash;
use std::sync::Arc;

type SizeFn<P> = dyn Fn(Option<&P>, &Context) -> std::result::Result<i64, ReadError> + Send + Sync;

/// Number of items a container reader reads.
///
/// Usually taken from a context variable or a field of the parent that an
/// earlier reader has set.
pub struct Size<P> {
    get: Arc<SizeFn<P>>,
}

impl<P> Clone for Size<P> {
    fn clone(&self) -> Self {
        Self {
            get: Arc::clone(&self.get),
        }
    }
}

impl<P> Size<P> {
    /// Size computed from the (optional) parent and the context
    pub fn from_fn<F>(f: F) -> Self
    where
        F: Fn(Option<&P>, &Context) -> std::result::Result<i64, ReadError> + Send + Sync + 'static,
    {
        Self { get: Arc::new(f) }
    }

    /// Size stored in a context variable
    pub fn variable(name: impl Into<String>) -> Self {
        let name = name.into();
        Self::from_fn(move |_, ctx| ctx.get_variable_as_int(&name))
    }

    /// Size read from the parent; fails when reading a root value
    pub fn parent<F>(f: F) -> Self
    where
        F: Fn(&P) -> usize + Send + Sync + 'static,
    {
        Self::from_fn(move |parent, _| {
            let parent = parent.ok_or(ReadError::MissingParent)?;
            i64::try_from(f(parent)).map_err(|_| ReadError::Custom("container size overflow".into()))
        })
    }

    /// Constant size
    pub fn fixed(size: usize) -> Self {
        Self::from_fn(move |_, _| {
            i64::try_from(size).map_err(|_| ReadError::Custom("container size overflow".into()))
        })
    }

    /// Evaluate the size
    pub fn get(&self, parent: Option<&P>, context: &Context) -> std::result::Result<usize, ReadError> {
        let value = (self.get)(parent, context)?;
        usize::try_from(value).map_err(|_| ReadError::NegativeSize { value })
    }
}

impl<P> From<&str> for Size<P> {
    fn from(name: &str) -> Self {
        Size::variable(name)
    }
}

impl<P> From<String> for Size<P> {
    fn from(name: String) -> Self {
        Size::variable(name)
    }
}

impl<P> From<usize> for Size<P> {
    fn from(size: usize) -> Self {
        Size::fixed(size)
    }
}

/// A collection that container readers can fill
pub trait Container<E> {
    /// Create an empty container able to hold `size` items
    fn with_size(size: usize) -> Self;

    /// Insert the item read at position `index`
    fn insert_at(&mut self, index: usize, item: E);
}

impl<E> Container<E> for Vec<E> {
    fn with_size(size: usize) -> Self {
        Vec::with_capacity(size)
    }

    fn insert_at(&mut self, index: usize, item: E) {
        debug_assert_eq!(index, self.len());
        self.push(item);
    }
}

impl<E> Container<E> for VecDeque<E> {
    fn with_size(size: usize) -> Self {
        VecDeque::with_capacity(size)
    }

    fn insert_at(&mut self, _index: usize, item: E) {
        self.push_back(item);
    }
}

impl<E: Ord> Container<E> for BTreeSet<E> {
    fn with_size(_size: usize) -> Self {
        BTreeSet::new()
    }

    fn insert_at(&mut self, _index: usize, item: E) {
        self.insert(item);
    }
}

impl<E: Hash + Eq> Container<E> for HashSet<E> {
    fn with_size(size: usize) -> Self {
        HashSet::with_capacity(size)
    }

    fn insert_at(&mut self, _index: usize, item: E) {
        self.insert(item);
    }
}

impl<E: Hash + Eq> Container<E> for IndexSet<E> {
    fn with_size(size: usize) -> Self {
        IndexSet::with_capacity(size)
    }

    fn insert_at(&mut self, _index: usize, item: E) {
        self.insert(item);
    }
}

/// A child reader that creates a container, then reads as many items as
/// its [`Size`] says with an item reader, in input order.
pub struct ContainerReader<E, C, P> {
    size: Size<P>,
    item_reader: Arc<dyn ChildReader<E, P>>,
    constructor: Arc<dyn Fn(usize) -> C + Send + Sync>,
    add: Arc<dyn Fn(&mut C, usize, E) + Send + Sync>,
}

impl<E, C, P> ContainerReader<E, C, P> {
    /// Create a container reader.
    ///
    /// `constructor` receives a capacity hint, never above the number of
    /// lines left in the input. `add` receives each item with its index.
    pub fn new<R, K, A>(size: impl Into<Size<P>>, item_reader: R, constructor: K, add: A) -> Self
    where
        R: ChildReader<E, P> + 'static,
        K: Fn(usize) -> C + Send + Sync + 'static,
        A: Fn(&mut C, usize, E) + Send + Sync + 'static,
    {
        Self {
            size: size.into(),
            item_reader: Arc::new(item_reader),
            constructor: Arc::new(constructor),
            add: Arc::new(add),
        }
    }
}

impl<E: 'static, C: Container<E> + 'static, P> ContainerReader<E, C, P> {
    /// Read any [`Container`]
    pub fn collection<R>(size: impl Into<Size<P>>, item_reader: R) -> Self
    where
        R: ChildReader<E, P> + 'static,
    {
        Self::new(size, item_reader, C::with_size, C::insert_at)
    }
}

impl<E: 'static, P> ContainerReader<E, Vec<E>, P> {
    /// Read a list of items
    pub fn list<R>(size: impl Into<Size<P>>, item_reader: R) -> Self
    where
        R: ChildReader<E, P> + 'static,
    {
        Self::collection(size, item_reader)
    }

    /// Read a fixed-size array of items
    pub fn array<R>(
        size: impl Into<Size<P>>,
        item_reader: R,
    ) -> MapReader<Self, fn(Vec<E>) -> Box<[E]>, Vec<E>>
    where
        R: ChildReader<E, P> + 'static,
    {
        Self::list(size, item_reader).map(Vec::into_boxed_slice as fn(Vec<E>) -> Box<[E]>)
    }
}

impl<E, C, P> ChildReader<C, P> for ContainerReader<E, C, P> {
    fn read(&self, context: &mut Context, mut parent: Option<&mut P>) -> Result<C> {
        let size = self
            .size
            .get(parent.as_deref(), context)
            .map_err(|e| e.at(context.next_line_number()))?;
        log::trace!("reading {} item(s) from line {}", size, context.next_line_number());
        // The declared size comes from the input and is not trusted for allocation
        let mut container = (self.constructor)(size.min(context.remaining_lines()));
        for index in 0..size {
            let item = self.item_reader.read(context, parent.as_deref_mut())?;
            (self.add)(&mut container, index, item);
        }
        Ok(container)
    }
}
