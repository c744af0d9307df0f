mod keyed;

use proc_macro::TokenStream;

// ============================================================================
// #[derive(Keyed)] derive macro
// ============================================================================

/// Derive macro for the `Keyed` trait.
///
/// # Usage
///
/// ```ignore
/// #[derive(Clone, Serialize, Deserialize, Keyed)]
/// #[keyed(collection = "artworks")]
/// struct Artwork {
///     #[keyed(id)]
///     pub id: String,
///     pub title: String,
/// }
/// ```
///
/// - `#[keyed(collection = "...")]` sets the collection name.
///   If omitted, defaults to snake_case struct name + "s".
/// - `#[keyed(id)]` marks the field used as the unique identifier.
///   If omitted, defaults to a field named `id`.
#[proc_macro_derive(Keyed, attributes(keyed))]
pub fn derive_keyed(input: TokenStream) -> TokenStream {
    keyed::derive_keyed(input)
}
