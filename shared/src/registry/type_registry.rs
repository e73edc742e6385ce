use std::collections::{BTreeMap, HashMap};

use log::{debug, info, warn};

use crate::{
    codec::arg::Arg,
    registry::{
        constructor::{Constructor, ConstructorSchema, ErasedConstructor},
        constructor_cache::ConstructorCache,
        error::RegistryError,
    },
    type_key::TypeKey,
};

/// Bidirectional mapping between extension types and dense numeric ids, with
/// a factory per id.
///
/// Ids start at the registry's offset, which reserves the range below it for
/// variants built into the host application, and grow by one per
/// registration. An id is never reused. Registering the same type twice is
/// refused, the first id stays valid.
pub struct TypeRegistry<B: ?Sized> {
    label: &'static str,
    id_offset: u32,
    next_id: u32,
    required_arity: Option<usize>,
    id_by_key: HashMap<TypeKey, u32>,
    key_by_id: BTreeMap<u32, TypeKey>,
    constructors: ConstructorCache<B>,
    locked: bool,
}

impl<B: ?Sized + 'static> TypeRegistry<B> {
    /// Creates an empty registry handing out ids from `id_offset`.
    /// When `required_arity` is set, registered types must declare a
    /// constructor taking exactly that many arguments.
    pub fn new(label: &'static str, id_offset: u32, required_arity: Option<usize>) -> Self {
        Self {
            label,
            id_offset,
            next_id: id_offset,
            required_arity,
            id_by_key: HashMap::new(),
            key_by_id: BTreeMap::new(),
            constructors: ConstructorCache::new(),
            locked: false,
        }
    }

    pub fn label(&self) -> &'static str {
        self.label
    }

    pub fn id_offset(&self) -> u32 {
        self.id_offset
    }

    /// The id the next successful registration will receive
    pub fn next_id(&self) -> u32 {
        self.next_id
    }

    // Registration

    /// Registers `T` with the constructors it can be built from
    ///
    /// Returns false, and logs why, if the registry refuses the type. No id
    /// is allocated in that case.
    pub fn register<T: 'static>(
        &mut self,
        constructors: Vec<Constructor<T>>,
        upcast: fn(T) -> Box<B>,
    ) -> bool {
        match self.try_register(constructors, upcast) {
            Ok(_) => true,
            Err(error) => {
                warn!("{}", error);
                false
            }
        }
    }

    /// Registers `T` with the constructors it can be built from
    ///
    /// Returns the assigned id, or the reason the type was refused.
    pub fn try_register<T: 'static>(
        &mut self,
        constructors: Vec<Constructor<T>>,
        upcast: fn(T) -> Box<B>,
    ) -> Result<u32, RegistryError> {
        let constructors = constructors
            .into_iter()
            .map(|constructor| ErasedConstructor::erase(constructor, upcast))
            .collect();
        self.try_register_erased(TypeKey::of::<T>(), constructors)
    }

    pub fn try_register_erased(
        &mut self,
        key: TypeKey,
        constructors: Vec<ErasedConstructor<B>>,
    ) -> Result<u32, RegistryError> {
        if self.locked {
            return Err(RegistryError::Locked {
                registry: self.label,
            });
        }
        if let Some(id) = self.id_by_key.get(&key) {
            return Err(RegistryError::AlreadyRegistered {
                registry: self.label,
                type_name: key.name(),
                id: *id,
            });
        }
        if constructors.is_empty() {
            return Err(RegistryError::NoConstructor {
                registry: self.label,
                type_name: key.name(),
            });
        }
        if let Some(arity) = self.required_arity {
            if !constructors
                .iter()
                .any(|constructor| constructor.arity() == arity)
            {
                return Err(RegistryError::MissingConstructor {
                    registry: self.label,
                    type_name: key.name(),
                    arity,
                });
            }
        }
        if self.next_id == u32::MAX {
            return Err(RegistryError::IdSpaceExhausted {
                registry: self.label,
            });
        }

        let id = self.next_id;
        self.next_id += 1;
        self.id_by_key.insert(key, id);
        self.key_by_id.insert(id, key);
        self.constructors.insert(key, constructors);

        info!("Registered {} as {} id {}", key, self.label, id);
        Ok(id)
    }

    /// Stops accepting registrations
    pub fn lock(&mut self) {
        self.locked = true;
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    // Lookup

    /// Get the id of a registered type
    ///
    /// # Panics
    ///
    /// Panics if `T` was never registered. Referencing an unregistered type
    /// is a bug in the extension, not a network condition.
    /// Consider using `try_id_of` for non-panicking error handling.
    pub fn id_of<T: ?Sized + 'static>(&self) -> u32 {
        match self.try_id_of::<T>() {
            Ok(id) => id,
            Err(error) => panic!("{}", error),
        }
    }

    /// Get the id of a registered type
    ///
    /// Returns an error if `T` was never registered.
    pub fn try_id_of<T: ?Sized + 'static>(&self) -> Result<u32, RegistryError> {
        self.try_id_of_key(&TypeKey::of::<T>())
    }

    /// Get the id registered for `key`
    ///
    /// # Panics
    ///
    /// Panics if no type with this key was registered.
    /// Consider using `try_id_of_key` for non-panicking error handling.
    pub fn id_of_key(&self, key: &TypeKey) -> u32 {
        match self.try_id_of_key(key) {
            Ok(id) => id,
            Err(error) => panic!("{}", error),
        }
    }

    pub fn try_id_of_key(&self, key: &TypeKey) -> Result<u32, RegistryError> {
        self.id_by_key
            .get(key)
            .copied()
            .ok_or(RegistryError::NotRegistered {
                registry: self.label,
                type_name: key.name(),
            })
    }

    pub fn is_registered<T: ?Sized + 'static>(&self) -> bool {
        self.id_by_key.contains_key(&TypeKey::of::<T>())
    }

    /// Resolve an id received from the network
    ///
    /// `None` is expected when the sending peer has an extension this peer
    /// lacks.
    pub fn resolve(&self, id: u32) -> Option<TypeKey> {
        self.key_by_id.get(&id).copied()
    }

    /// Converts a registered type to its id, see [`TypeRegistry::id_of`]
    pub fn as_id<T: ?Sized + 'static>(&self) -> u32 {
        self.id_of::<T>()
    }

    /// Converts an id back to the registered type, see [`TypeRegistry::resolve`]
    pub fn from_id(&self, id: u32) -> Option<TypeKey> {
        self.resolve(id)
    }

    /// Parameter list of the constructor instances of `id` are sent with
    pub fn schema_for_id(&self, id: u32) -> Option<&ConstructorSchema> {
        let key = self.resolve(id)?;
        self.constructors.schema_for(&key)
    }

    pub fn schema_cache(&self) -> &ConstructorCache<B> {
        &self.constructors
    }

    /// Builds an instance of the type registered as `id`
    ///
    /// Yields `None` when the id is unknown, the arguments do not fit, or
    /// the constructor fails.
    pub fn instantiate(&self, id: u32, args: Vec<Arg>) -> Option<Box<B>> {
        match self.try_instantiate(id, args) {
            Ok(instance) => Some(instance),
            Err(error) => {
                debug!("{}", error);
                None
            }
        }
    }

    pub fn try_instantiate(&self, id: u32, args: Vec<Arg>) -> Result<Box<B>, RegistryError> {
        let key = self.resolve(id).ok_or(RegistryError::UnknownId {
            registry: self.label,
            id,
        })?;
        Ok(self.constructors.construct(&key, args)?)
    }

    pub fn len(&self) -> usize {
        self.key_by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.key_by_id.is_empty()
    }

    /// Registered types in id order
    pub fn iter(&self) -> impl Iterator<Item = (u32, TypeKey)> + '_ {
        self.key_by_id.iter().map(|(id, key)| (*id, *key))
    }
}
