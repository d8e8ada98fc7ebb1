/// Upper bound on the number of messages in one published block, dictated
/// by the SQS `SendMessageBatch` entry limit
pub const MAX_BLOCK_COUNT: usize = 10;

/// Upper bound on the size of a single SQS message in bytes. Attribute
/// names and values count toward the limit alongside the payload.
pub const MAX_MESSAGE_SIZE: usize = 262_144;

/// One name/value pair attached to a message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    /// Attribute name
    pub name: String,
    /// Attribute value
    pub value: String,
}

impl Attribute {
    /// Creates an attribute pair
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// One unit of work bound for the queue: an ordered attribute list plus an
/// opaque payload delivered as the SQS message body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    /// Ordered name/value attribute pairs
    pub attributes: Vec<Attribute>,
    /// Payload bytes; must be valid UTF-8 by the time they are published
    pub payload: Vec<u8>,
}

impl Message {
    /// Size the queue accounts against the message limit: payload bytes
    /// plus every attribute name and value
    #[must_use]
    pub fn size(&self) -> usize {
        self.payload.len()
            + self
                .attributes
                .iter()
                .map(|attribute| attribute.name.len() + attribute.value.len())
                .sum::<usize>()
    }
}

/// Configuration for the dispatcher
#[derive(Debug, Clone)]
pub struct DispatchConfig {
    /// Resolved URL of the output queue
    pub queue_url: String,
    /// S3 bucket receiving payloads too large for direct queue delivery
    pub oversize_bucket: String,
}
