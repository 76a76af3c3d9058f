use serde::{Deserialize, Serialize};

/// One row of CoinGecko's `/coins/markets`, trimmed to what the panel uses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoinMarket {
    pub id: String,
    pub symbol: String,
    pub name: String,
    #[serde(default)]
    pub image: Option<String>,
    /// Null for listings CoinGecko has no price for
    #[serde(default)]
    pub current_price: Option<f64>,
    /// Null for coins without a 24 h history
    #[serde(default)]
    pub price_change_percentage_24h: Option<f64>,
    #[serde(default)]
    pub sparkline_in_7d: Option<Sparkline>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Sparkline {
    #[serde(default)]
    pub price: Vec<f64>,
}

impl CoinMarket {
    pub fn change_24h(&self) -> f64 {
        self.price_change_percentage_24h.unwrap_or(0.0)
    }

    pub fn is_up(&self) -> bool {
        self.change_24h() >= 0.0
    }

    pub fn prices(&self) -> &[f64] {
        self.sparkline_in_7d
            .as_ref()
            .map(|s| s.price.as_slice())
            .unwrap_or_default()
    }
}

fn coin(
    id: &str,
    symbol: &str,
    name: &str,
    image: &str,
    price: f64,
    change: f64,
    sparkline: &[f64],
) -> CoinMarket {
    CoinMarket {
        id: id.to_string(),
        symbol: symbol.to_string(),
        name: name.to_string(),
        image: Some(image.to_string()),
        current_price: Some(price),
        price_change_percentage_24h: Some(change),
        sparkline_in_7d: Some(Sparkline {
            price: sparkline.to_vec(),
        }),
    }
}

/// Fixed market snapshot shown when neither the API nor the cache can answer.
pub fn fallback_coins() -> Vec<CoinMarket> {
    vec![
        coin(
            "bitcoin",
            "btc",
            "Bitcoin",
            "https://assets.coingecko.com/coins/images/1/large/bitcoin.png",
            65432.1,
            2.5,
            &[64000.0, 64500.0, 65000.0, 64800.0, 65200.0, 65400.0, 65432.0],
        ),
        coin(
            "ethereum",
            "eth",
            "Ethereum",
            "https://assets.coingecko.com/coins/images/279/large/ethereum.png",
            3521.45,
            1.8,
            &[3400.0, 3450.0, 3500.0, 3480.0, 3510.0, 3520.0, 3521.0],
        ),
        coin(
            "tether",
            "usdt",
            "Tether",
            "https://assets.coingecko.com/coins/images/325/large/Tether.png",
            1.0,
            0.01,
            &[1.0; 7],
        ),
        coin(
            "binancecoin",
            "bnb",
            "Binance Coin",
            "https://assets.coingecko.com/coins/images/825/large/bnb-icon2_2x.png",
            608.32,
            -0.8,
            &[615.0, 610.0, 605.0, 608.0, 607.0, 609.0, 608.0],
        ),
        coin(
            "solana",
            "sol",
            "Solana",
            "https://assets.coingecko.com/coins/images/4128/large/solana.png",
            142.75,
            3.2,
            &[135.0, 138.0, 140.0, 139.0, 141.0, 143.0, 142.0],
        ),
    ]
}
