use std::fmt;

use crate::error::MockFailure;

/// A named contract whose operations can be mocked.
///
/// Calls and replies are carried as tagged variants (`Call`, `Reply`) so the
/// controller can keep expectations for every operation in one ledger without
/// type erasure through `Any`.
pub trait Interface: Sized + 'static {
    const NAME: &'static str;

    /// Every request the interface accepts, tagged by operation
    type Call: fmt::Debug + Send + 'static;

    /// Every result the interface produces, tagged by operation
    type Reply: Send + 'static;

    /// Context-like first argument of each operation
    type Context: fmt::Debug + Send + Sync + 'static;

    /// Opaque trailing per-call option
    type CallOption: fmt::Debug + Send + Sync + 'static;

    /// Application-level error channel of the interface
    type Error: From<MockFailure> + Send + 'static;

    fn method_name(call: &Self::Call) -> &'static str;
}

/// One operation of an [`Interface`].
pub trait Method: 'static {
    type Interface: Interface;

    const NAME: &'static str;

    type Request: fmt::Debug + Send + 'static;

    /// Returned by expectations that have no scripted result
    type Response: Default + Send + 'static;

    fn into_call(request: Self::Request) -> <Self::Interface as Interface>::Call;

    fn request(call: &<Self::Interface as Interface>::Call) -> Option<&Self::Request>;

    fn into_reply(
        result: Result<Self::Response, <Self::Interface as Interface>::Error>,
    ) -> <Self::Interface as Interface>::Reply;

    fn from_reply(
        reply: <Self::Interface as Interface>::Reply,
    ) -> Option<Result<Self::Response, <Self::Interface as Interface>::Error>>;
}

/// Generate the dispatch table for a mockable interface.
///
/// Expands to:
/// - a marker type implementing [`Interface`]
/// - the `Call` and `Reply` enums, one variant per operation
/// - one marker type per operation implementing [`Method`]
/// - a recorder with one registration method per operation
///
/// ```ignore
/// mock_recorder::mock_interface! {
///     pub interface MetadataService {
///         context: CallContext,
///         option: CallOption,
///         error: tonic::Status,
///         calls: MetadataCall,
///         replies: MetadataReply,
///         recorder: MockMetadataServiceClientRecorder,
///         methods {
///             GetSchemas => get_schemas(SchemaRequest) -> SchemaResponse;
///         }
///     }
/// }
/// ```
#[macro_export]
macro_rules! mock_interface {
    (
        $(#[$meta:meta])*
        $vis:vis interface $name:ident {
            context: $ctx:ty,
            option: $opt:ty,
            error: $err:ty,
            calls: $call:ident,
            replies: $reply:ident,
            recorder: $recorder:ident,
            methods {
                $(
                    $(#[$method_meta:meta])*
                    $method:ident => $fn_name:ident($req:ty) -> $resp:ty;
                )+
            }
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy)]
        $vis struct $name;

        #[derive(Debug)]
        $vis enum $call {
            $( $method($req), )+
        }

        $vis enum $reply {
            $( $method(::core::result::Result<$resp, $err>), )+
        }

        impl $crate::Interface for $name {
            const NAME: &'static str = stringify!($name);

            type Call = $call;
            type Reply = $reply;
            type Context = $ctx;
            type CallOption = $opt;
            type Error = $err;

            fn method_name(call: &$call) -> &'static str {
                match call {
                    $( $call::$method(_) => stringify!($method), )+
                }
            }
        }

        $(
            $(#[$method_meta])*
            #[derive(Debug, Clone, Copy)]
            $vis struct $method;

            impl $crate::Method for $method {
                type Interface = $name;

                const NAME: &'static str = stringify!($method);

                type Request = $req;
                type Response = $resp;

                fn into_call(request: $req) -> $call {
                    $call::$method(request)
                }

                fn request(call: &$call) -> ::core::option::Option<&$req> {
                    #[allow(unreachable_patterns)]
                    match call {
                        $call::$method(request) => ::core::option::Option::Some(request),
                        _ => ::core::option::Option::None,
                    }
                }

                fn into_reply(result: ::core::result::Result<$resp, $err>) -> $reply {
                    $reply::$method(result)
                }

                fn from_reply(
                    reply: $reply,
                ) -> ::core::option::Option<::core::result::Result<$resp, $err>> {
                    #[allow(unreachable_patterns)]
                    match reply {
                        $reply::$method(result) => ::core::option::Option::Some(result),
                        _ => ::core::option::Option::None,
                    }
                }
            }
        )+

        /// Declares expected calls, one method per operation
        #[derive(Clone)]
        $vis struct $recorder {
            controller: ::std::sync::Arc<$crate::Controller<$name>>,
        }

        impl $recorder {
            pub fn new(controller: ::std::sync::Arc<$crate::Controller<$name>>) -> Self {
                Self { controller }
            }

            $(
                pub fn $fn_name(
                    &self,
                    request: impl $crate::Matcher<$req> + 'static,
                ) -> $crate::ExpectationHandle<'_, $method> {
                    self.controller.register::<$method>(request)
                }
            )+
        }
    };
}
