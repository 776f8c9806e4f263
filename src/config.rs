use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};

/// 应用配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub store: StoreConfig,
    pub mirror: MirrorConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// 本地持久化存储 (SQLite)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    pub url: String,
    pub max_connections: u32,
}

/// 服务端销售镜像文件
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MirrorConfig {
    pub path: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 8080,
            },
            store: StoreConfig {
                url: "sqlite://data/plushie-db.sqlite".to_string(),
                max_connections: 5,
            },
            mirror: MirrorConfig {
                path: "data/sales.json".to_string(),
            },
        }
    }
}

impl AppConfig {
    /// 加载配置: 默认值 -> plushie.{toml,yaml,json} -> PLUSHIE__* 环境变量
    pub fn load() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        Config::builder()
            .set_default("server.host", defaults.server.host)?
            .set_default("server.port", i64::from(defaults.server.port))?
            .set_default("store.url", defaults.store.url)?
            .set_default("store.max_connections", i64::from(defaults.store.max_connections))?
            .set_default("mirror.path", defaults.mirror.path)?
            .add_source(File::with_name("plushie").required(false))
            .add_source(
                Environment::with_prefix("PLUSHIE")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }
}
