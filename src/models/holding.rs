use serde::{Deserialize, Serialize};

/// A single portfolio position as returned by `/holdings`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Holding {
    pub symbol: String,
    pub qty: f64,
    pub avg: f64,
}

impl Holding {
    pub fn investment(&self) -> f64 {
        self.qty * self.avg
    }
}

/// Sum of qty × avg across all holdings.
pub fn total_investment(holdings: &[Holding]) -> f64 {
    holdings.iter().map(Holding::investment).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_investment() {
        let holdings = vec![
            Holding { symbol: "TCS.NS".into(), qty: 10.0, avg: 100.0 },
            Holding { symbol: "INFY.NS".into(), qty: 2.5, avg: 40.0 },
        ];
        assert_eq!(total_investment(&holdings), 1100.0);
        assert_eq!(total_investment(&[]), 0.0);
    }

    #[test]
    fn test_decodes_backend_shape() {
        let raw = r#"[{"symbol":"TCS.NS","qty":10.0,"avg":3500.5}]"#;
        let holdings: Vec<Holding> = serde_json::from_str(raw).unwrap();
        assert_eq!(holdings[0].symbol, "TCS.NS");
        assert_eq!(holdings[0].investment(), 35005.0);
    }
}
