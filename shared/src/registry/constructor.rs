use std::{any::type_name, fmt, vec};

use crate::{codec::arg::Arg, registry::error::ConstructError, type_key::TypeKey};

/// One parameter of a [`ConstructorSchema`]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SchemaParam {
    pub position: usize,
    pub ty: TypeKey,
}

/// Ordered parameter list of the constructor a type is sent with
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConstructorSchema {
    params: Vec<SchemaParam>,
}

impl ConstructorSchema {
    pub fn new(types: &[TypeKey]) -> Self {
        let params = types
            .iter()
            .enumerate()
            .map(|(position, ty)| SchemaParam { position, ty: *ty })
            .collect();
        Self { params }
    }

    pub fn params(&self) -> &[SchemaParam] {
        &self.params
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SchemaParam> {
        self.params.iter()
    }

    /// Checks that `args` match this schema position by position
    pub fn check(&self, args: &[Arg]) -> Result<(), ConstructError> {
        if args.len() != self.params.len() {
            return Err(ConstructError::ArityMismatch {
                expected: self.params.len(),
                actual: args.len(),
            });
        }
        for (param, arg) in self.params.iter().zip(args) {
            if arg.type_key() != param.ty {
                return Err(ConstructError::ArgumentType {
                    position: param.position,
                    expected: param.ty.name(),
                    found: arg.type_key().name(),
                });
            }
        }
        Ok(())
    }
}

/// Arguments handed to a constructor, consumed front to back
pub struct ConstructorArgs {
    args: vec::IntoIter<Arg>,
    position: usize,
}

impl ConstructorArgs {
    pub fn new(args: Vec<Arg>) -> Self {
        Self {
            args: args.into_iter(),
            position: 0,
        }
    }

    pub fn next<T: 'static>(&mut self) -> Result<T, ConstructError> {
        let position = self.position;
        self.position += 1;

        let arg = self
            .args
            .next()
            .ok_or(ConstructError::MissingArgument { position })?;
        let found = arg.type_key().name();
        arg.take::<T>().ok_or(ConstructError::ArgumentType {
            position,
            expected: type_name::<T>(),
            found,
        })
    }

    pub fn remaining(&self) -> usize {
        self.args.len()
    }
}

pub type BuildFn<T> = fn(&mut ConstructorArgs) -> Result<T, ConstructError>;

/// A constructor an extension type exposes to the registry: its parameter
/// types in order, and the function building the value from them.
///
/// ```
/// use modnet_shared::{Constructor, PlayerId};
///
/// struct Shield {
///     owner: PlayerId,
///     strength: i32,
/// }
///
/// let constructor = Constructor::new(|args| {
///     Ok(Shield {
///         owner: args.next()?,
///         strength: args.next()?,
///     })
/// })
/// .param::<PlayerId>()
/// .param::<i32>();
///
/// assert_eq!(constructor.arity(), 2);
/// ```
pub struct Constructor<T> {
    params: Vec<TypeKey>,
    build: BuildFn<T>,
}

impl<T> Constructor<T> {
    pub fn new(build: BuildFn<T>) -> Self {
        Self {
            params: Vec::new(),
            build,
        }
    }

    pub fn param<P: 'static>(mut self) -> Self {
        self.params.push(TypeKey::of::<P>());
        self
    }

    pub fn params(&self) -> &[TypeKey] {
        &self.params
    }

    pub fn arity(&self) -> usize {
        self.params.len()
    }

    pub fn build(&self, args: &mut ConstructorArgs) -> Result<T, ConstructError> {
        (self.build)(args)
    }
}

type ErasedBuildFn<B> = Box<dyn Fn(&mut ConstructorArgs) -> Result<Box<B>, ConstructError> + Send + Sync>;

/// A [`Constructor`] whose output has been boxed into the registry's base type
pub struct ErasedConstructor<B: ?Sized> {
    params: Vec<TypeKey>,
    build: ErasedBuildFn<B>,
}

impl<B: ?Sized + 'static> ErasedConstructor<B> {
    pub fn erase<T: 'static>(constructor: Constructor<T>, upcast: fn(T) -> Box<B>) -> Self {
        let Constructor { params, build } = constructor;
        Self {
            params,
            build: Box::new(move |args: &mut ConstructorArgs| build(args).map(upcast)),
        }
    }

    pub fn params(&self) -> &[TypeKey] {
        &self.params
    }

    pub fn arity(&self) -> usize {
        self.params.len()
    }

    pub fn build(&self, args: &mut ConstructorArgs) -> Result<Box<B>, ConstructError> {
        (self.build)(args)
    }
}

impl<B: ?Sized> fmt::Debug for ErasedConstructor<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ErasedConstructor")
            .field("params", &self.params)
            .finish()
    }
}
