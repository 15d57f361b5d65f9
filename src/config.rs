use anyhow::Context;
use std::env;

const SHYFT_URL: &str = "https://defi.shyft.to";
const SOLFLARE_UTL_BASE: &str = "https://token-list-api.solana.cloud/v1";

/// Which upstream provider this process serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provider {
    Pools,
    Tokens,
}

impl Provider {
    /// Resolves the provider from the first CLI argument, falling back to
    /// the `SERVER_TYPE` environment variable and then to pools.
    pub fn resolve(arg: Option<String>) -> anyhow::Result<Self> {
        let name = match arg {
            Some(name) => name,
            None => env::var("SERVER_TYPE").unwrap_or_else(|_| "pools".into()),
        };
        match name.as_str() {
            "pools" | "shyft" => Ok(Provider::Pools),
            "tokens" | "solflare" => Ok(Provider::Tokens),
            other => anyhow::bail!("unknown provider '{other}' (expected 'pools' or 'tokens')"),
        }
    }
}

#[derive(Clone)]
pub struct Config {
    pub provider: Provider,
    pub shyft_url: String,
    /// Present only for the pools provider; loading fails without it.
    pub shyft_api_key: Option<String>,
    pub solflare_url: String,
}

impl Config {
    pub fn from_env(provider: Provider) -> anyhow::Result<Self> {
        let shyft_api_key = match provider {
            Provider::Pools => {
                Some(env::var("SHYFT_API_KEY").context("SHYFT_API_KEY must be set")?)
            }
            Provider::Tokens => None,
        };

        Ok(Self {
            provider,
            shyft_url: env::var("SHYFT_URL").unwrap_or_else(|_| SHYFT_URL.into()),
            shyft_api_key,
            solflare_url: env::var("SOLFLARE_UTL_BASE")
                .unwrap_or_else(|_| SOLFLARE_UTL_BASE.into()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_provider_names_and_aliases() {
        assert_eq!(
            Provider::resolve(Some("pools".into())).unwrap(),
            Provider::Pools
        );
        assert_eq!(
            Provider::resolve(Some("shyft".into())).unwrap(),
            Provider::Pools
        );
        assert_eq!(
            Provider::resolve(Some("tokens".into())).unwrap(),
            Provider::Tokens
        );
        assert_eq!(
            Provider::resolve(Some("solflare".into())).unwrap(),
            Provider::Tokens
        );
    }

    #[test]
    fn rejects_unknown_provider() {
        assert!(Provider::resolve(Some("jupiter".into())).is_err());
    }
}
