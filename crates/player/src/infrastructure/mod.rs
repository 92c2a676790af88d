pub mod client_accessor;
pub mod clock;
pub mod storage;
pub mod supabase;

pub use client_accessor::BackendClientAccessor;
pub use clock::SystemClock;
pub use storage::FileSessionStorage;
pub use supabase::SupabaseClient;
