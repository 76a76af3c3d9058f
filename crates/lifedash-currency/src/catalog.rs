//! Known currencies and the country → currency defaults.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Currency {
    pub code: &'static str,
    pub name: &'static str,
    pub symbol: &'static str,
}

const fn c(code: &'static str, name: &'static str, symbol: &'static str) -> Currency {
    Currency { code, name, symbol }
}

pub const CURRENCIES: &[Currency] = &[
    c("USD", "US Dollar", "$"),
    c("EUR", "Euro", "€"),
    c("GBP", "British Pound", "£"),
    c("JPY", "Japanese Yen", "¥"),
    c("CAD", "Canadian Dollar", "C$"),
    c("AUD", "Australian Dollar", "A$"),
    c("CHF", "Swiss Franc", "Fr"),
    c("CNY", "Chinese Yuan", "¥"),
    c("INR", "Indian Rupee", "₹"),
    c("BRL", "Brazilian Real", "R$"),
    c("RUB", "Russian Ruble", "₽"),
    c("KRW", "South Korean Won", "₩"),
    c("SGD", "Singapore Dollar", "S$"),
    c("NZD", "New Zealand Dollar", "NZ$"),
    c("MXN", "Mexican Peso", "Mex$"),
    c("HKD", "Hong Kong Dollar", "HK$"),
    c("TRY", "Turkish Lira", "₺"),
    c("ZAR", "South African Rand", "R"),
    c("SEK", "Swedish Krona", "kr"),
    c("NOK", "Norwegian Krone", "kr"),
    c("DKK", "Danish Krone", "kr"),
    c("PLN", "Polish Złoty", "zł"),
    c("THB", "Thai Baht", "฿"),
    c("IDR", "Indonesian Rupiah", "Rp"),
    c("HUF", "Hungarian Forint", "Ft"),
    c("CZK", "Czech Koruna", "Kč"),
    c("ILS", "Israeli New Shekel", "₪"),
    c("CLP", "Chilean Peso", "$"),
    c("PHP", "Philippine Peso", "₱"),
    c("AED", "United Arab Emirates Dirham", "د.إ"),
    c("COP", "Colombian Peso", "$"),
    c("SAR", "Saudi Riyal", "﷼"),
    c("MYR", "Malaysian Ringgit", "RM"),
    c("RON", "Romanian Leu", "lei"),
    c("LKR", "Sri Lankan Rupee", "Rs"),
    c("NGN", "Nigerian Naira", "₦"),
    c("VND", "Vietnamese Dong", "₫"),
    c("PKR", "Pakistani Rupee", "₨"),
    c("EGP", "Egyptian Pound", "E£"),
    c("BGN", "Bulgarian Lev", "лв"),
    c("HRK", "Croatian Kuna", "kn"),
    c("QAR", "Qatari Riyal", "﷼"),
    c("KWD", "Kuwaiti Dinar", "د.ك"),
    c("ISK", "Icelandic Króna", "kr"),
    c("KES", "Kenyan Shilling", "KSh"),
    c("BHD", "Bahraini Dinar", ".د.ب"),
    c("ARS", "Argentine Peso", "$"),
    c("PEN", "Peruvian Sol", "S/"),
    c("UAH", "Ukrainian Hryvnia", "₴"),
];

const COUNTRY_CURRENCY: &[(&str, &str)] = &[
    ("US", "USD"),
    ("GB", "GBP"),
    ("DE", "EUR"),
    ("FR", "EUR"),
    ("IT", "EUR"),
    ("ES", "EUR"),
    ("JP", "JPY"),
    ("CN", "CNY"),
    ("CA", "CAD"),
    ("AU", "AUD"),
    ("CH", "CHF"),
    ("IN", "INR"),
    ("BR", "BRL"),
    ("RU", "RUB"),
    ("KR", "KRW"),
    ("SG", "SGD"),
    ("NZ", "NZD"),
    ("MX", "MXN"),
    ("HK", "HKD"),
    ("TR", "TRY"),
    ("ZA", "ZAR"),
    ("SE", "SEK"),
    ("NO", "NOK"),
    ("DK", "DKK"),
    ("PL", "PLN"),
    ("TH", "THB"),
    ("ID", "IDR"),
    ("HU", "HUF"),
    ("CZ", "CZK"),
    ("IL", "ILS"),
    ("CL", "CLP"),
    ("PH", "PHP"),
    ("AE", "AED"),
    ("CO", "COP"),
    ("SA", "SAR"),
    ("MY", "MYR"),
    ("RO", "RON"),
    ("LK", "LKR"),
    ("NG", "NGN"),
    ("VN", "VND"),
    ("PK", "PKR"),
    ("EG", "EGP"),
    ("BG", "BGN"),
    ("HR", "HRK"),
    ("QA", "QAR"),
    ("KW", "KWD"),
    ("IS", "ISK"),
    ("KE", "KES"),
    ("BH", "BHD"),
    ("AR", "ARS"),
    ("PE", "PEN"),
    ("UA", "UAH"),
];

/// Target currency when the location gives no better answer.
pub const DEFAULT_TO: &str = "EUR";

pub fn currency(code: &str) -> Option<&'static Currency> {
    CURRENCIES.iter().find(|c| c.code.eq_ignore_ascii_case(code))
}

/// Local currency for an ISO country code, if known.
pub fn currency_for_country(country: &str) -> Option<&'static str> {
    COUNTRY_CURRENCY
        .iter()
        .find(|(cc, _)| cc.eq_ignore_ascii_case(country))
        .map(|(_, code)| *code)
}

/// Default conversion target for a location: its local currency, else EUR.
pub fn default_target(country: &str) -> &'static str {
    currency_for_country(country).unwrap_or(DEFAULT_TO)
}

/// Case-insensitive match on code or name, sorted by name. An empty query
/// lists everything.
pub fn search(query: &str) -> Vec<&'static Currency> {
    let query = query.trim().to_lowercase();
    let mut matches: Vec<&'static Currency> = CURRENCIES
        .iter()
        .filter(|c| {
            query.is_empty()
                || c.code.to_lowercase().contains(&query)
                || c.name.to_lowercase().contains(&query)
        })
        .collect();
    matches.sort_by_cached_key(|c| c.name.to_lowercase());
    matches
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup() {
        assert_eq!(currency("lkr").map(|c| c.symbol), Some("Rs"));
        assert!(currency("XYZ").is_none());
    }

    #[test]
    fn test_country_defaults() {
        assert_eq!(currency_for_country("FR"), Some("EUR"));
        assert_eq!(currency_for_country("lk"), Some("LKR"));
        assert_eq!(currency_for_country("Unknown"), None);
        assert_eq!(default_target("Unknown"), "EUR");
        assert_eq!(default_target("JP"), "JPY");
    }

    #[test]
    fn test_search_by_code_and_name() {
        let hits: Vec<&str> = search("dollar").iter().map(|c| c.code).collect();
        assert_eq!(hits.first(), Some(&"AUD"));
        assert!(hits.contains(&"USD"));
        assert!(hits.contains(&"HKD"));

        let by_code: Vec<&str> = search("nok").iter().map(|c| c.code).collect();
        assert_eq!(by_code, ["NOK"]);
    }

    #[test]
    fn test_empty_search_lists_all_sorted() {
        let all = search("");
        assert_eq!(all.len(), CURRENCIES.len());
        assert_eq!(all[0].code, "ARS");
        assert!(all.windows(2).all(|w| w[0].name.to_lowercase() <= w[1].name.to_lowercase()));
    }

    #[test]
    fn test_every_country_currency_is_in_catalog() {
        for (_, code) in COUNTRY_CURRENCY {
            assert!(currency(code).is_some(), "{} missing", code);
        }
    }
}
