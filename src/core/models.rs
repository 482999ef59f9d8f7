use serde::{
    Deserialize,
    Serialize,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermRecord {
    pub content: String,     // Captured text as stored by the backend
    pub forgot_counter: u32, // Times the user pressed "forgot"
    pub sdate: i64,          // Review start (seconds since epoch)
    pub ndate: i64,          // Next scheduled review (seconds since epoch)
    pub status: String,      // Lifecycle label, shown as-is
    #[serde(default)]
    pub fdate: i64, // Finish date, 0 while the term is still being learned
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddCounts {
    pub bot: u32, // Added through the chat bot
    pub ext: u32, // Added through the capture client
}

impl AddCounts {
    pub fn total(&self) -> u64 {
        u64::from(self.bot) + u64::from(self.ext)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityEvent {
    pub date: i64, // Day timestamp (seconds since epoch)
    pub add: AddCounts,
    pub remember: u32,
    pub forgot: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub chat_id: i64,
    pub api_key: String,
}
