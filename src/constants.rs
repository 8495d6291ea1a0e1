pub const DEMO_QUEUE: &str = "Demo-Queue";
pub const DEMO_CONTENT_TYPE: &str = "text/plain";
pub const DEMO_MESSAGE: &str = "Hello, Amazon MQ!";

pub const SUCCESS_BODY: &str = "Message sent: ok";
