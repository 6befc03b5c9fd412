//! Read-only view over the host compiler's descriptor model.
//!
//! The generator never parses `.proto` text. It consumes descriptors that the
//! host (protoc, or a build script holding a `FileDescriptorSet`) already
//! resolved, through the small set of accessors defined here. Anything that can
//! answer these questions can drive generation.
//!
//! [`owned`] provides plain in-memory implementations of every trait.

pub mod owned;

/// Comments attached to a descriptor in its source file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SourceComments<'a> {
    /// Comment block directly above the element.
    pub leading: &'a str,

    /// Comment following the element on the same or next line.
    pub trailing: &'a str,
}

impl<'a> SourceComments<'a> {
    /// The leading comment if present, otherwise the trailing one.
    pub fn preferred(&self) -> &'a str {
        if self.leading.is_empty() {
            self.trailing
        } else {
            self.leading
        }
    }
}

/// A message type referenced by a method.
pub trait MessageDescriptor {
    /// Simple name, without package or enclosing messages.
    fn name(&self) -> &str;

    /// The message this one is nested in, if any.
    fn containing_type(&self) -> Option<&Self>;

    /// Path of the `.proto` file defining this message.
    fn file_name(&self) -> &str;
}

/// A single RPC method.
pub trait MethodDescriptor {
    type Message: MessageDescriptor;

    /// Name as written in the `.proto` file.
    fn name(&self) -> &str;

    /// Package-qualified, dot-delimited name.
    fn full_name(&self) -> &str;

    fn input_type(&self) -> &Self::Message;

    fn output_type(&self) -> &Self::Message;

    fn client_streaming(&self) -> bool;

    fn server_streaming(&self) -> bool;

    fn deprecated(&self) -> bool;

    fn comments(&self) -> SourceComments<'_>;
}

/// A service declaration.
pub trait ServiceDescriptor {
    type Method: MethodDescriptor;

    /// Name as written in the `.proto` file.
    fn name(&self) -> &str;

    /// Package-qualified, dot-delimited name.
    fn full_name(&self) -> &str;

    /// Methods in declaration order.
    fn methods(&self) -> &[Self::Method];

    fn comments(&self) -> SourceComments<'_>;
}

/// A `.proto` file.
pub trait FileDescriptor {
    type Service: ServiceDescriptor;

    /// Path of the file relative to its import root (e.g. `helloworld/helloworld.proto`).
    fn name(&self) -> &str;

    /// Services in declaration order.
    fn services(&self) -> &[Self::Service];
}
