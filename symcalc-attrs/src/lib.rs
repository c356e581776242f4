mod structures;

use proc_macro::TokenStream;
use quote::quote;
use structures::ErrorKindTarget;
use syn::parse_macro_input;

/// Derives the [`ErrorKind`] trait for the given struct.
///
/// This trait can be derived for any kind of struct.
///
/// The information of the error can be customized using the `error` attribute by adding the
/// corresponding tags to it:
/// ```ignore
/// use symcalc_attrs::ErrorKind;
///
/// #[derive(Debug, ErrorKind)]
/// #[error(category = Parse, message = "unexpected end of file", labels = ["add something here"])]
/// pub struct Foo;
/// ```
///
/// The following tags are available:
///
/// | Tag         | Description                                                                  |
/// | ----------- | ---------------------------------------------------------------------------- |
/// | `category`  | The variant of `ErrorCategory` the error belongs to. Required.               |
/// | `message`   | The message displayed at the top of the error when it is displayed.          |
/// | `labels`    | An array of label texts, paired in order with the spans of the error.        |
/// | `help`      | Optional help text for the error, describing what the user can do to fix it. |
///
/// Each tag except `category` accepts an expression. For structs with named fields, the
/// expression is evaluated with the members of the struct in scope, so they can be used in the
/// expression (tuple structs are not supported).
///
/// [`ErrorKind`]: https://docs.rs/symcalc-error
#[proc_macro_derive(ErrorKind, attributes(error))]
pub fn error_kind(item: TokenStream) -> TokenStream {
    let target = parse_macro_input!(item as ErrorKindTarget);
    let name = &target.name;
    quote! {
        impl symcalc_error::ErrorKind for #name {
            fn as_any(&self) -> &dyn std::any::Any {
                self
            }
            #target
        }
    }.into()
}
