use thiserror::Error;

/// Errors that can occur while building an instance from constructor arguments
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConstructError {
    /// Fewer arguments were supplied than the constructor reads
    #[error("Missing constructor argument at position {position}")]
    MissingArgument {
        position: usize,
    },

    /// An argument has a different runtime type than the parameter
    #[error("Constructor argument {position} should be {expected} but is {found}")]
    ArgumentType {
        position: usize,
        expected: &'static str,
        found: &'static str,
    },

    /// The number of arguments does not match the constructor schema
    #[error("Constructor takes {expected} argument(s) but {actual} were supplied")]
    ArityMismatch {
        expected: usize,
        actual: usize,
    },

    /// The type declares no usable constructor
    #[error("Type declares no constructor")]
    NoConstructor,

    /// The constructor rejected its arguments
    #[error("Constructor failed: {reason}")]
    Failed {
        reason: String,
    },

    /// The constructor panicked
    #[error("Constructor for {type_name} panicked")]
    Panicked {
        type_name: &'static str,
    },
}

/// Errors that can occur during type registry operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// Registry no longer accepts registrations
    #[error("The {registry} registry is locked. Types must be registered during extension load, before Protocol.lock()")]
    Locked {
        registry: &'static str,
    },

    /// Type was registered before
    #[error("Type {type_name} is already registered in the {registry} registry with id {id}")]
    AlreadyRegistered {
        registry: &'static str,
        type_name: &'static str,
        id: u32,
    },

    /// Type declares no constructor at all
    #[error("Type {type_name} declares no constructor and cannot be registered in the {registry} registry")]
    NoConstructor {
        registry: &'static str,
        type_name: &'static str,
    },

    /// Type lacks a constructor of the arity the registry requires
    #[error("Type {type_name} has no constructor taking {arity} argument(s), which the {registry} registry requires")]
    MissingConstructor {
        registry: &'static str,
        type_name: &'static str,
        arity: usize,
    },

    /// Every id of the registry has been handed out
    #[error("The {registry} registry has no ids left")]
    IdSpaceExhausted {
        registry: &'static str,
    },

    /// Type was never registered
    #[error("Type {type_name} is not registered in the {registry} registry. Register it during extension load before referencing it")]
    NotRegistered {
        registry: &'static str,
        type_name: &'static str,
    },

    /// Numeric id is not known to this registry
    #[error("Id {id} is not known to the {registry} registry")]
    UnknownId {
        registry: &'static str,
        id: u32,
    },

    /// Instance construction failed
    #[error("Failed to construct instance: {0}")]
    Construct(#[from] ConstructError),
}
