//! The abstract description of a generated adapter, before it is rendered to tokens.

use crate::model::{EventType, ReceiverKind, ReturnShape};
use proc_macro2::TokenStream as SynTokenStream;
use syn::*;

/// The field holding the wrapped source type instance.
#[derive(Clone, Debug)]
pub struct DelegateField {
    pub ident: Ident,
    pub ty: Type,
}

/// How a constructor builds the delegate.
#[derive(Clone, Debug)]
pub enum ConstructorBody {
    /// Builds the delegate with `Default::default()`.
    Default,
    /// Builds a delegate without fields with an empty struct literal.
    Empty,
    /// Calls a constructor of the source type with the adapter constructor's arguments.
    Forward { target: Ident, args: Vec<Ident>, shape: ReturnShape },
}

/// A constructor of the adapter.
#[derive(Clone, Debug)]
pub struct ConstructorDesc {
    pub attrs: Vec<Attribute>,
    pub vis: Visibility,
    pub sig: Signature,
    pub body: ConstructorBody,
}
impl ConstructorDesc {
    /// The types of the constructor parameters, in order.
    pub fn param_types(&self) -> Vec<&Type> {
        self.sig.inputs.iter().filter_map(|x| match x {
            FnArg::Typed(typed) => Some(&*typed.ty),
            FnArg::Receiver(_) => None,
        }).collect()
    }
}

/// A method of the adapter that calls the same method on the delegate.
#[derive(Clone, Debug)]
pub struct ForwardedMethod {
    pub attrs: Vec<Attribute>,
    pub vis: Visibility,
    pub sig: Signature,
    pub args: Vec<Ident>,
    pub turbofish: Option<SynTokenStream>,
    pub returns_value: bool,
}

/// An inherent impl block of the adapter, mirroring one impl block of the source type.
#[derive(Clone, Debug)]
pub struct InherentBlock {
    pub attrs: Vec<Attribute>,
    pub generics: Generics,
    pub self_ty: Type,
    pub delegate_ty: Type,
    pub constructors: Vec<ConstructorDesc>,
    pub methods: Vec<ForwardedMethod>,
}

/// How an argument of a trait method is passed on to the delegate.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ArgPass {
    /// Passed unchanged.
    Plain(Ident),
    /// A `Self` argument; its delegate is passed.
    Unwrap(Ident),
    /// A `&Self` argument; a reference to its delegate is passed.
    UnwrapRef(Ident),
    /// A `&mut Self` argument; a mutable reference to its delegate is passed.
    UnwrapMut(Ident),
}

/// How the value returned by the delegate is turned into the adapter method's return value.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum OutputWrap {
    /// Returned unchanged.
    Plain,
    /// A `Self` value; wrapped into a new adapter.
    Wrap,
    /// An `Option<Self>` or `Result<Self, E>`; the contained value is wrapped.
    WrapFallible,
}

/// A trait method of the adapter that calls the source type's implementation.
#[derive(Clone, Debug)]
pub struct TraitMethod {
    pub attrs: Vec<Attribute>,
    pub sig: Signature,
    pub receiver: ReceiverKind,
    pub args: Vec<ArgPass>,
    pub turbofish: Option<SynTokenStream>,
    pub output: OutputWrap,
}

/// An item of a copied trait impl.
#[derive(Clone, Debug)]
pub enum TraitItemDesc {
    /// An associated type, copied verbatim.
    Type(ImplItemType),
    /// An associated constant, read from the source type's implementation.
    Const { attrs: Vec<Attribute>, ident: Ident, ty: Type },
    Method(TraitMethod),
}

/// A trait implemented by the adapter by forwarding to the source type's implementation.
#[derive(Clone, Debug)]
pub struct TraitBlock {
    pub attrs: Vec<Attribute>,
    pub unsafety: Option<Token![unsafe]>,
    pub generics: Generics,
    pub negative: Option<Token![!]>,
    pub trait_path: Path,
    pub self_ty: Type,
    pub delegate_ty: Type,
    pub items: Vec<TraitItemDesc>,
}

/// One type test of the dispatch method, and the handlers called when it matches.
#[derive(Clone, Debug)]
pub struct Branch {
    pub event: EventType,
    pub handlers: Vec<Ident>,
}

/// The implementation of `EventListener::on_event`.
#[derive(Clone, Debug)]
pub struct DispatchMethod {
    pub generics: Generics,
    pub branches: Vec<Branch>,
}

/// Everything needed to render an adapter type.
#[derive(Clone, Debug)]
pub struct AdapterDescription {
    pub ident: Ident,
    pub source: Ident,
    pub vis: Visibility,
    pub attrs: Vec<Attribute>,
    pub generics: Generics,
    pub delegate: DelegateField,
    pub blocks: Vec<InherentBlock>,
    pub supertype: Option<TraitBlock>,
    pub interfaces: Vec<TraitBlock>,
    pub dispatch: DispatchMethod,
    pub crate_path: SynTokenStream,
}
impl AdapterDescription {
    /// Every constructor of the adapter, in order.
    pub fn constructors(&self) -> Vec<&ConstructorDesc> {
        self.blocks.iter().flat_map(|x| x.constructors.iter()).collect()
    }

    /// Every forwarded inherent method of the adapter, in order.
    pub fn forwarded_methods(&self) -> Vec<&ForwardedMethod> {
        self.blocks.iter().flat_map(|x| x.methods.iter()).collect()
    }
}

/// A generated adapter together with the information needed to write it out.
#[derive(Clone, Debug)]
pub struct AdapterFile {
    /// The module path of the source type, relative to the processed root.
    pub package: Vec<String>,
    pub header: [&'static str; 3],
    pub adapter: AdapterDescription,
}
