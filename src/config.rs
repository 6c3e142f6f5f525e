use dotenv::dotenv;

#[derive(Clone, Debug, Deserialize)]
pub struct Config {
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default = "default_database_url")]
    pub database_url: String,
    #[serde(default = "default_database_name")]
    pub database_name: String,
}

fn default_port() -> u16 {
    8080
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_database_url() -> String {
    "mongodb://localhost:27017".to_string()
}

fn default_database_name() -> String {
    "movieflix".to_string()
}

lazy_static! {
    pub static ref CONFIG: Config = get_config();
}

pub fn get_config() -> Config {
    dotenv().ok();
    envy::from_env().expect("Configuration could not be loaded from environment")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_gets_a_config() {
        let config = get_config();
        assert_ne!(config.port, 0);
    }

    #[test]
    fn it_defaults_the_port_to_8080() {
        assert_eq!(default_port(), 8080);
    }
}
