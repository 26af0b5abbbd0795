//! Runtime type registry
//!
//! Maps a type's [`TypeId`] to its write/read function pair. Statically known
//! types go through [`Wire`] directly; the registry exists for code that
//! wires handlers up at startup, such as generated bindings that only know
//! the element type of a collection when they register it.
//!
//! The process-wide table is read-mostly. Registration is expected to finish
//! before traffic starts, but the table is lock-protected so late
//! registrations are still sound.
//!
//! Dispatching a type that was never registered is a programming error and
//! panics with the type name.

use std::any::{type_name, Any, TypeId};
use std::collections::HashMap;

use once_cell::sync::Lazy;
use parking_lot::RwLock;
use tracing::{debug, error, warn};

use crate::error::Result;
use crate::reader::Reader;
use crate::wire::Wire;
use crate::writer::Writer;

/// Encode function for `T`
pub type WriteFn<T> = fn(&mut Writer, &T) -> Result<()>;

/// Decode function for `T`
pub type ReadFn<T> = fn(&mut Reader<'_>) -> Result<T>;

/// Registered handler pair for one type
pub struct Handlers<T> {
    /// Encoder
    pub write: WriteFn<T>,
    /// Decoder
    pub read: ReadFn<T>,
}

impl<T> Clone for Handlers<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Handlers<T> {}

struct Entry {
    type_name: &'static str,
    handlers: Box<dyn Any + Send + Sync>,
}

/// Type-keyed table of handler pairs
#[derive(Default)]
pub struct Registry {
    entries: HashMap<TypeId, Entry>,
}

impl Registry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the handlers for `T`; the last registration wins
    ///
    /// Returns `true` if an earlier registration was replaced.
    pub fn register<T: 'static>(&mut self, write: WriteFn<T>, read: ReadFn<T>) -> bool {
        let name = type_name::<T>();
        let entry = Entry {
            type_name: name,
            handlers: Box::new(Handlers { write, read }),
        };
        let replaced = self.entries.insert(TypeId::of::<T>(), entry).is_some();
        if replaced {
            warn!(type_name = name, "replacing wire handlers");
        } else {
            debug!(type_name = name, "registered wire handlers");
        }
        replaced
    }

    /// Register `T`'s own [`Wire`] implementation
    pub fn register_wire<T: Wire + 'static>(&mut self) -> bool {
        self.register::<T>(write_via_wire::<T>, read_via_wire::<T>)
    }

    /// Whether handlers exist for `T`
    pub fn contains<T: 'static>(&self) -> bool {
        self.entries.contains_key(&TypeId::of::<T>())
    }

    /// Number of registered types
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if nothing is registered
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up the handlers for `T`
    pub fn handlers<T: 'static>(&self) -> Option<Handlers<T>> {
        let entry = self.entries.get(&TypeId::of::<T>())?;
        debug_assert_eq!(entry.type_name, type_name::<T>());
        entry.handlers.downcast_ref::<Handlers<T>>().copied()
    }

    fn expect_handlers<T: 'static>(&self) -> Handlers<T> {
        match self.handlers::<T>() {
            Some(handlers) => handlers,
            None => missing::<T>(),
        }
    }

    /// Write `value` with the registered encoder
    ///
    /// # Panics
    ///
    /// Panics if `T` has no registered handlers.
    pub fn write<T: 'static>(&self, writer: &mut Writer, value: &T) -> Result<()> {
        (self.expect_handlers::<T>().write)(writer, value)
    }

    /// Read a `T` with the registered decoder
    ///
    /// # Panics
    ///
    /// Panics if `T` has no registered handlers.
    pub fn read<T: 'static>(&self, reader: &mut Reader<'_>) -> Result<T> {
        (self.expect_handlers::<T>().read)(reader)
    }

    /// Write an optional sequence, each element through the registered encoder
    ///
    /// # Panics
    ///
    /// Panics if `T` has no registered handlers, even for a null or empty list.
    pub fn write_list<T: 'static>(&self, writer: &mut Writer, items: Option<&[T]>) -> Result<()> {
        writer.write_list_with(items, self.expect_handlers::<T>().write)
    }

    /// Read an optional sequence, each element through the registered decoder
    ///
    /// # Panics
    ///
    /// Panics if `T` has no registered handlers.
    pub fn read_list<T: 'static>(&self, reader: &mut Reader<'_>) -> Result<Option<Vec<T>>> {
        reader.read_list_with(self.expect_handlers::<T>().read)
    }
}

fn write_via_wire<T: Wire>(writer: &mut Writer, value: &T) -> Result<()> {
    value.write_to(writer)
}

fn read_via_wire<T: Wire>(reader: &mut Reader<'_>) -> Result<T> {
    T::read_from(reader)
}

#[cold]
fn missing<T>() -> ! {
    let name = type_name::<T>();
    error!(type_name = name, "dispatch on a type without wire handlers");
    panic!(
        "no wire handlers registered for `{name}`; register them at startup with \
         gamewire::registry::register or register_wire before serializing"
    )
}

static GLOBAL: Lazy<RwLock<Registry>> = Lazy::new(|| RwLock::new(Registry::new()));

fn global_handlers<T: 'static>() -> Handlers<T> {
    let handlers = GLOBAL.read().handlers::<T>();
    match handlers {
        Some(handlers) => handlers,
        None => missing::<T>(),
    }
}

/// Register handlers for `T` in the process-wide registry
pub fn register<T: 'static>(write: WriteFn<T>, read: ReadFn<T>) -> bool {
    GLOBAL.write().register(write, read)
}

/// Register `T`'s [`Wire`] implementation in the process-wide registry
pub fn register_wire<T: Wire + 'static>() -> bool {
    GLOBAL.write().register_wire::<T>()
}

/// Whether the process-wide registry has handlers for `T`
pub fn is_registered<T: 'static>() -> bool {
    GLOBAL.read().contains::<T>()
}

/// Write `value` through the process-wide registry
///
/// # Panics
///
/// Panics if `T` was never registered.
pub fn write<T: 'static>(writer: &mut Writer, value: &T) -> Result<()> {
    (global_handlers::<T>().write)(writer, value)
}

/// Read a `T` through the process-wide registry
///
/// # Panics
///
/// Panics if `T` was never registered.
pub fn read<T: 'static>(reader: &mut Reader<'_>) -> Result<T> {
    (global_handlers::<T>().read)(reader)
}

/// Write an optional sequence through the process-wide registry
///
/// # Panics
///
/// Panics if `T` was never registered.
pub fn write_list<T: 'static>(writer: &mut Writer, items: Option<&[T]>) -> Result<()> {
    writer.write_list_with(items, global_handlers::<T>().write)
}

/// Read an optional sequence through the process-wide registry
///
/// # Panics
///
/// Panics if `T` was never registered.
pub fn read_list<T: 'static>(reader: &mut Reader<'_>) -> Result<Option<Vec<T>>> {
    reader.read_list_with(global_handlers::<T>().read)
}
