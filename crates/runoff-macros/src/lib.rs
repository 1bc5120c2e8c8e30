use proc_macro::TokenStream;
use proc_macro2::Literal;
use quote::quote;
use syn::{parse_macro_input, Data, DeriveInput, Expr, Fields};

/// Derive macro implementing `runoff_core::traits::ModelParams` for a struct
/// of named `f64` fields.
///
/// Field declaration order is the flat-vector order used by `from_array` and
/// `to_array`. Each field may carry `#[param(min = .., max = ..)]` giving its
/// calibration range; fields without it are unbounded.
///
/// ```ignore
/// #[derive(Debug, Clone, Copy, ModelParams)]
/// pub struct Parameters {
///     #[param(min = 1.0, max = 1500.0)]
///     pub capacity: f64,
///     #[param(min = 0.0, max = 1.0)]
///     pub loss: f64,
/// }
/// ```
#[proc_macro_derive(ModelParams, attributes(param))]
pub fn derive_model_params(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    let name = &input.ident;

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(named) => &named.named,
            _ => {
                return syn::Error::new_spanned(
                    name,
                    "ModelParams can only be derived for structs with named fields",
                )
                .to_compile_error()
                .into();
            }
        },
        _ => {
            return syn::Error::new_spanned(name, "ModelParams can only be derived for structs")
                .to_compile_error()
                .into();
        }
    };

    if fields.is_empty() {
        return syn::Error::new_spanned(name, "ModelParams struct must have at least one field")
            .to_compile_error()
            .into();
    }

    let mut field_idents = Vec::new();
    let mut field_names = Vec::new();
    let mut bounds = Vec::new();
    for field in fields {
        let ident = field.ident.as_ref().unwrap();
        if !is_f64_type(&field.ty) {
            return syn::Error::new_spanned(&field.ty, "ModelParams derive: all fields must be f64")
                .to_compile_error()
                .into();
        }
        let (min, max) = match extract_bounds(field) {
            Ok(b) => b,
            Err(err) => return err.to_compile_error().into(),
        };
        field_names.push(ident.to_string());
        field_idents.push(ident);
        bounds.push(quote! { (#min, #max) });
    }

    let n_params = field_idents.len();
    let indices: Vec<Literal> = (0..n_params).map(Literal::usize_unsuffixed).collect();
    let field_name_strs: Vec<&str> = field_names.iter().map(|s| s.as_str()).collect();

    let expanded = quote! {
        impl ::runoff_core::traits::ModelParams for #name {
            const N_PARAMS: usize = #n_params;
            const PARAM_NAMES: &'static [&'static str] = &[#(#field_name_strs),*];
            const PARAM_BOUNDS: &'static [(f64, f64)] = &[#(#bounds),*];

            fn from_array(arr: &[f64]) -> ::runoff_core::Result<Self> {
                if arr.len() != #n_params {
                    return Err(::runoff_core::Error::ParameterCount {
                        expected: #n_params,
                        got: arr.len(),
                    });
                }
                Ok(Self {
                    #(#field_idents: arr[#indices],)*
                })
            }

            fn from_fn<F: FnMut(usize) -> f64>(mut f: F) -> Self {
                Self {
                    #(#field_idents: f(#indices),)*
                }
            }

            fn to_array(&self) -> Vec<f64> {
                vec![#(self.#field_idents),*]
            }
        }
    };

    expanded.into()
}

fn extract_bounds(field: &syn::Field) -> syn::Result<(Expr, Expr)> {
    let mut min: Option<Expr> = None;
    let mut max: Option<Expr> = None;
    for attr in &field.attrs {
        if !attr.path().is_ident("param") {
            continue;
        }
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("min") {
                min = Some(meta.value()?.parse()?);
                Ok(())
            } else if meta.path.is_ident("max") {
                max = Some(meta.value()?.parse()?);
                Ok(())
            } else {
                Err(meta.error("expected `min` or `max`"))
            }
        })?;
    }
    let min = min.unwrap_or_else(|| syn::parse_quote!(f64::NEG_INFINITY));
    let max = max.unwrap_or_else(|| syn::parse_quote!(f64::INFINITY));
    Ok((min, max))
}

fn is_f64_type(ty: &syn::Type) -> bool {
    if let syn::Type::Path(type_path) = ty {
        type_path.path.is_ident("f64")
    } else {
        false
    }
}
