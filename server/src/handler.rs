use std::ops::Deref;
use std::str::FromStr;
use std::sync::Arc;

use driver::database::InMemoryDatabase;
use error_stack::ResultExt;
use kernel::KernelError;
use vodca::References;

#[derive(Clone)]
pub struct AppModule(Arc<Handler>);

impl AppModule {
    pub fn new() -> error_stack::Result<Self, KernelError> {
        Ok(Self(Arc::new(Handler::init()?)))
    }
}

impl Deref for AppModule {
    type Target = Handler;
    fn deref(&self) -> &Self::Target {
        Deref::deref(&self.0)
    }
}

#[derive(References)]
pub struct Handler {
    database: InMemoryDatabase,
    settings: Settings,
}

impl Handler {
    pub fn init() -> error_stack::Result<Self, KernelError> {
        let database = InMemoryDatabase::new();
        let settings = Settings::load()?;

        Ok(Self { database, settings })
    }
}

static SERVER_PORT: &str = "SERVER_PORT";
static MOST_LIKED_COUNT: &str = "MOST_LIKED_COUNT";

#[derive(Debug, Clone, References)]
pub struct Settings {
    port: u16,
    /// Page size for the popular-films query when the caller supplies no
    /// explicit count.
    most_liked_count: u32,
}

impl Settings {
    pub fn load() -> error_stack::Result<Self, KernelError> {
        let port = env_or(SERVER_PORT, 8080)?;
        let most_liked_count = env_or(MOST_LIKED_COUNT, 10)?;

        Ok(Self {
            port,
            most_liked_count,
        })
    }
}

fn env_or<T>(key: &'static str, default: T) -> error_stack::Result<T, KernelError>
where
    T: FromStr,
    T::Err: error_stack::Context,
{
    match dotenvy::var(key) {
        Ok(value) => value
            .parse::<T>()
            .change_context_lazy(|| KernelError::Internal)
            .attach_printable_lazy(|| format!("{key} must be a number")),
        Err(_) => Ok(default),
    }
}
