use std::{
    collections::HashMap,
    panic::{catch_unwind, AssertUnwindSafe},
    sync::{
        atomic::{AtomicUsize, Ordering},
        OnceLock,
    },
};

use log::debug;

use crate::{
    codec::arg::Arg,
    registry::{
        constructor::{ConstructorArgs, ConstructorSchema, ErasedConstructor},
        error::ConstructError,
    },
    type_key::TypeKey,
};

struct Selection {
    index: usize,
    schema: ConstructorSchema,
}

struct CacheEntry<B: ?Sized> {
    constructors: Vec<ErasedConstructor<B>>,
    selection: OnceLock<Option<Selection>>,
}

/// Memoizes, per registered type, which constructor is used on the wire and
/// its parameter list.
///
/// Entries are created empty when a type is registered. The schema is worked
/// out the first time it is asked for and never again.
pub struct ConstructorCache<B: ?Sized> {
    entries: HashMap<TypeKey, CacheEntry<B>>,
    computed: AtomicUsize,
}

impl<B: ?Sized + 'static> ConstructorCache<B> {
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
            computed: AtomicUsize::new(0),
        }
    }

    pub(crate) fn insert(&mut self, key: TypeKey, constructors: Vec<ErasedConstructor<B>>) {
        self.entries.insert(
            key,
            CacheEntry {
                constructors,
                selection: OnceLock::new(),
            },
        );
    }

    pub fn contains(&self, key: &TypeKey) -> bool {
        self.entries.contains_key(key)
    }

    /// Returns the parameter list of the constructor `key` is sent with
    pub fn schema_for(&self, key: &TypeKey) -> Option<&ConstructorSchema> {
        self.selection(key).map(|selection| &selection.schema)
    }

    /// Number of schemas worked out so far
    pub fn computed_count(&self) -> usize {
        self.computed.load(Ordering::Relaxed)
    }

    /// Builds an instance of `key` from `args` with the selected constructor.
    /// A panicking constructor is reported as an error.
    pub fn construct(&self, key: &TypeKey, args: Vec<Arg>) -> Result<Box<B>, ConstructError> {
        let entry = self.entries.get(key).ok_or(ConstructError::NoConstructor)?;
        let selection = self.selection(key).ok_or(ConstructError::NoConstructor)?;
        selection.schema.check(&args)?;

        let constructor = &entry.constructors[selection.index];
        let mut args = ConstructorArgs::new(args);
        let result = catch_unwind(AssertUnwindSafe(|| constructor.build(&mut args)));
        let Ok(result) = result else {
            return Err(ConstructError::Panicked {
                type_name: key.name(),
            });
        };
        let instance = result?;

        if args.remaining() > 0 {
            debug!(
                "Constructor of {} left {} argument(s) unread",
                key,
                args.remaining()
            );
        }
        Ok(instance)
    }

    fn selection(&self, key: &TypeKey) -> Option<&Selection> {
        let entry = self.entries.get(key)?;
        entry
            .selection
            .get_or_init(|| {
                self.computed.fetch_add(1, Ordering::Relaxed);
                let selection = select_constructor(&entry.constructors).map(|index| Selection {
                    index,
                    schema: ConstructorSchema::new(entry.constructors[index].params()),
                });
                if let Some(selection) = &selection {
                    debug!(
                        "Computed wire schema of {}: {} parameter(s)",
                        key,
                        selection.schema.len()
                    );
                }
                selection
            })
            .as_ref()
    }
}

impl<B: ?Sized + 'static> Default for ConstructorCache<B> {
    fn default() -> Self {
        Self::new()
    }
}

/// Picks the constructor with the fewest parameters. Ties go to the one
/// declared first.
pub fn select_constructor<B: ?Sized + 'static>(constructors: &[ErasedConstructor<B>]) -> Option<usize> {
    constructors
        .iter()
        .enumerate()
        .min_by_key(|(_, constructor)| constructor.arity())
        .map(|(index, _)| index)
}
