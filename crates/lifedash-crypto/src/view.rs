use serde::Serialize;

use crate::sparkline::{format_price, stroke_color, svg_points};
use crate::types::CoinMarket;

pub const NO_FAVORITES: &str = "You haven't added any cryptocurrencies to your favorites yet.";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CoinRow {
    pub id: String,
    /// Upper-cased ticker
    pub symbol: String,
    pub name: String,
    /// "$65,432.1"
    pub price: String,
    pub change_24h: f64,
    /// Absolute change to two places, e.g. "0.80%"
    pub change_text: String,
    pub is_up: bool,
    pub sparkline: String,
    pub stroke: &'static str,
    pub favorite: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CryptoView {
    pub all: Vec<CoinRow>,
    /// Coins present in both the market list and the favorites set, in
    /// market order
    pub favorites: Vec<CoinRow>,
    pub has_favorites: bool,
}

impl CryptoView {
    pub fn new(coins: &[CoinMarket], favorite_ids: &[String]) -> Self {
        let all: Vec<CoinRow> = coins
            .iter()
            .map(|coin| row(coin, favorite_ids.iter().any(|id| id == &coin.id)))
            .collect();
        let favorites = all.iter().filter(|r| r.favorite).cloned().collect();

        Self {
            all,
            favorites,
            has_favorites: !favorite_ids.is_empty(),
        }
    }
}

fn row(coin: &CoinMarket, favorite: bool) -> CoinRow {
    let change = coin.change_24h();
    CoinRow {
        id: coin.id.clone(),
        symbol: coin.symbol.to_uppercase(),
        name: coin.name.clone(),
        price: coin
            .current_price
            .map_or_else(|| "N/A".to_string(), |p| format!("${}", format_price(p))),
        change_24h: change,
        change_text: format!("{:.2}%", change.abs()),
        is_up: coin.is_up(),
        sparkline: svg_points(coin.prices()),
        stroke: stroke_color(change),
        favorite,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::fallback_coins;

    #[test]
    fn test_rows() {
        let view = CryptoView::new(&fallback_coins(), &[]);
        let bnb = &view.all[3];
        assert_eq!(bnb.symbol, "BNB");
        assert_eq!(bnb.price, "$608.32");
        assert_eq!(bnb.change_text, "0.80%");
        assert!(!bnb.is_up);
        assert_eq!(bnb.stroke, crate::sparkline::DOWN_COLOR);
        assert!(view.favorites.is_empty());
        assert!(!view.has_favorites);
    }

    #[test]
    fn test_favorites_filtered_in_market_order() {
        let favs = vec!["solana".to_string(), "bitcoin".to_string()];
        let view = CryptoView::new(&fallback_coins(), &favs);
        let ids: Vec<&str> = view.favorites.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, ["bitcoin", "solana"]);
        assert!(view.all[0].favorite);
    }

    #[test]
    fn test_missing_price_shown_as_unavailable() {
        let mut coins = fallback_coins();
        coins[0].current_price = None;
        let view = CryptoView::new(&coins, &[]);
        assert_eq!(view.all[0].price, "N/A");
        assert_eq!(view.all[1].price, "$3,521.45");
    }

    #[test]
    fn test_unlisted_favorite_is_not_shown() {
        let favs = vec!["dogecoin".to_string()];
        let view = CryptoView::new(&fallback_coins(), &favs);
        assert!(view.favorites.is_empty());
        assert!(view.has_favorites);
    }
}
