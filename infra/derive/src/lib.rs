#![allow(unreachable_pub)]
#![allow(clippy::needless_pass_by_value)]

//! # Macros
//!
//! Procedural macros shared by every crate of the workspace.
//!
//! * [`macro@switcharoo_error`] turns a plain enum into a `thiserror` error with
//!   context support and conversions.
//! * [`macro@shared`] turns a struct into a cheaply clonable `Arc` handle.
//!
//! The examples below are `ignore`d because a proc-macro crate cannot use its own
//! macros in doctests; the consuming crates carry the real tests.

mod macros;

use proc_macro::TokenStream;
use syn::{DeriveInput, ItemStruct, parse_macro_input};

/// Attribute macro for defining crate-level error enums.
///
/// # Features
///
/// * **Automatic Derives**: Injects `#[derive(Debug, thiserror::Error)]` unless already present.
/// * **Type Aliasing**: Creates a `Result<T>` alias next to the enum.
/// * **Context Support**: Generates a companion `<ErrorName>Ext` trait that adds `.context()`
///   to `Result<T, ErrorName>` and to `Result<T, SourceError>` for every source variant.
/// * **Standard Conversions**: Implements `From<SourceError>` for variants with a `source`
///   field (or a field marked `#[source]`/`#[from]`).
/// * **Internal Fallback**: `From<&'static str>` and `From<String>` when an `Internal`
///   variant exists.
///
/// # Requirements
///
/// 1. Applied to an **enum** with named-field variants only.
/// 2. Context fields must be typed `Option<Cow<'static, str>>`.
/// 3. A variant with a source must also carry a context field.
///
/// # Example
///
/// ```rust,ignore
/// use std::borrow::Cow;
///
/// #[switcharoo_derive::switcharoo_error]
/// pub enum StoreError {
///     #[error("Store unavailable{}: {message}", format_context(.context))]
///     Unavailable { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
///
///     #[error("Internal store error{}: {message}", format_context(.context))]
///     Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
/// }
///
/// fn lookup() -> Result<()> {
///     Err("index corrupted".into()) // From<&str> for Internal
/// }
/// ```
#[proc_macro_attribute]
pub fn switcharoo_error(_args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    macros::error::expand_derive(input).into()
}

/// Attribute macro for shared service handles.
///
/// Moves the annotated struct's fields into a generated `<Name>Inner` struct and
/// turns `<Name>` into a `Clone` wrapper around `Arc<<Name>Inner>` with `Deref` to the
/// inner state. Generic parameters and where-clauses are carried over to both types.
///
/// # Example
/// ```rust,ignore
/// #[switcharoo_derive::shared]
/// pub struct MemoryStore {
///     tables: RwLock<Tables>,
///     offline: AtomicBool,
/// }
///
/// let store = MemoryStore::new(MemoryStoreInner { tables, offline });
/// let handle = store.clone(); // shares the same tables
/// ```
#[proc_macro_attribute]
pub fn shared(_attr: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as ItemStruct);
    macros::shared::expand_shared(input).into()
}
