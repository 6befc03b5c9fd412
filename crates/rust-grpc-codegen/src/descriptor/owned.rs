//! In-memory descriptor implementations.
//!
//! Hosts that decode descriptors from the wire convert them into these types;
//! tests build them directly.

use super::{
    FileDescriptor, MessageDescriptor, MethodDescriptor, ServiceDescriptor, SourceComments,
};
use std::sync::Arc;

/// A message type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProtoMessage {
    name: String,
    file_name: String,
    parent: Option<Arc<ProtoMessage>>,
}

impl ProtoMessage {
    /// Create a top-level message defined in `file_name`.
    pub fn new(name: impl Into<String>, file_name: impl Into<String>) -> Arc<Self> {
        Arc::new(Self {
            name: name.into(),
            file_name: file_name.into(),
            parent: None,
        })
    }

    /// Create a message nested inside `parent`, in the same file.
    pub fn nested(parent: &Arc<ProtoMessage>, name: impl Into<String>) -> Arc<Self> {
        Arc::new(Self {
            name: name.into(),
            file_name: parent.file_name.clone(),
            parent: Some(Arc::clone(parent)),
        })
    }
}

impl MessageDescriptor for ProtoMessage {
    fn name(&self) -> &str {
        &self.name
    }

    fn containing_type(&self) -> Option<&Self> {
        self.parent.as_deref()
    }

    fn file_name(&self) -> &str {
        &self.file_name
    }
}

/// An RPC method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProtoMethod {
    name: String,
    full_name: String,
    input: Arc<ProtoMessage>,
    output: Arc<ProtoMessage>,
    client_streaming: bool,
    server_streaming: bool,
    deprecated: bool,
    leading_comments: String,
    trailing_comments: String,
}

impl ProtoMethod {
    /// Create a unary method. The full name is filled in when the method is
    /// added to a [`ProtoService`].
    pub fn new(name: impl Into<String>, input: Arc<ProtoMessage>, output: Arc<ProtoMessage>) -> Self {
        let name = name.into();
        Self {
            full_name: name.clone(),
            name,
            input,
            output,
            client_streaming: false,
            server_streaming: false,
            deprecated: false,
            leading_comments: String::new(),
            trailing_comments: String::new(),
        }
    }

    pub fn with_client_streaming(mut self, streaming: bool) -> Self {
        self.client_streaming = streaming;
        self
    }

    pub fn with_server_streaming(mut self, streaming: bool) -> Self {
        self.server_streaming = streaming;
        self
    }

    pub fn with_deprecated(mut self, deprecated: bool) -> Self {
        self.deprecated = deprecated;
        self
    }

    pub fn with_leading_comments(mut self, comments: impl Into<String>) -> Self {
        self.leading_comments = comments.into();
        self
    }

    pub fn with_trailing_comments(mut self, comments: impl Into<String>) -> Self {
        self.trailing_comments = comments.into();
        self
    }
}

impl MethodDescriptor for ProtoMethod {
    type Message = ProtoMessage;

    fn name(&self) -> &str {
        &self.name
    }

    fn full_name(&self) -> &str {
        &self.full_name
    }

    fn input_type(&self) -> &ProtoMessage {
        &self.input
    }

    fn output_type(&self) -> &ProtoMessage {
        &self.output
    }

    fn client_streaming(&self) -> bool {
        self.client_streaming
    }

    fn server_streaming(&self) -> bool {
        self.server_streaming
    }

    fn deprecated(&self) -> bool {
        self.deprecated
    }

    fn comments(&self) -> SourceComments<'_> {
        SourceComments {
            leading: &self.leading_comments,
            trailing: &self.trailing_comments,
        }
    }
}

/// A service declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProtoService {
    name: String,
    full_name: String,
    methods: Vec<ProtoMethod>,
    leading_comments: String,
    trailing_comments: String,
}

impl ProtoService {
    /// Create an empty service in `package` (empty for the root package).
    pub fn new(package: &str, name: impl Into<String>) -> Self {
        let name = name.into();
        let full_name = if package.is_empty() {
            name.clone()
        } else {
            format!("{package}.{name}")
        };
        Self {
            name,
            full_name,
            methods: Vec::new(),
            leading_comments: String::new(),
            trailing_comments: String::new(),
        }
    }

    /// Append a method, qualifying its full name with this service's.
    pub fn with_method(mut self, mut method: ProtoMethod) -> Self {
        method.full_name = format!("{}.{}", self.full_name, method.name);
        self.methods.push(method);
        self
    }

    pub fn with_leading_comments(mut self, comments: impl Into<String>) -> Self {
        self.leading_comments = comments.into();
        self
    }

    pub fn with_trailing_comments(mut self, comments: impl Into<String>) -> Self {
        self.trailing_comments = comments.into();
        self
    }
}

impl ServiceDescriptor for ProtoService {
    type Method = ProtoMethod;

    fn name(&self) -> &str {
        &self.name
    }

    fn full_name(&self) -> &str {
        &self.full_name
    }

    fn methods(&self) -> &[ProtoMethod] {
        &self.methods
    }

    fn comments(&self) -> SourceComments<'_> {
        SourceComments {
            leading: &self.leading_comments,
            trailing: &self.trailing_comments,
        }
    }
}

/// A `.proto` file and the services it declares.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProtoFile {
    name: String,
    services: Vec<ProtoService>,
}

impl ProtoFile {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            services: Vec::new(),
        }
    }

    pub fn with_service(mut self, service: ProtoService) -> Self {
        self.services.push(service);
        self
    }
}

impl FileDescriptor for ProtoFile {
    type Service = ProtoService;

    fn name(&self) -> &str {
        &self.name
    }

    fn services(&self) -> &[ProtoService] {
        &self.services
    }
}
