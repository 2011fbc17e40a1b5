use crate::api::AgentInfo;

//display-layer formatting; rounding and percentage conversion happen here
//and nowhere upstream, so intermediate state never accumulates rounding error

//hedge ratios and weights, 4 decimal places
pub fn ratio(value: f64) -> String {
    format!("{:.4}", value)
}

//absent metrics render as n/a, never as zero
pub fn opt_ratio(value: Option<f64>) -> String {
    value.map(ratio).unwrap_or_else(|| "n/a".to_string())
}

//fractional value as a percentage
pub fn pct(value: f64, decimals: usize) -> String {
    format!("{:.*}%", decimals, value * 100.0)
}

pub fn opt_pct(value: Option<f64>, decimals: usize) -> String {
    value
        .map(|v| pct(v, decimals))
        .unwrap_or_else(|| "n/a".to_string())
}

pub fn price(value: Option<f64>) -> String {
    value
        .map(|v| format!("${:.2}", v))
        .unwrap_or_else(|| "n/a".to_string())
}

pub fn opt_fixed(value: Option<f64>, decimals: usize) -> String {
    value
        .map(|v| format!("{:.*}", decimals, v))
        .unwrap_or_else(|| "n/a".to_string())
}

//cost footer from the gateway metadata attached to a response
pub fn agent_line(agent: Option<&AgentInfo>) -> Option<String> {
    agent.map(|a| {
        format!(
            "Request cost: ${:.4}  |  Cache: {}  |  Latency: {}ms",
            a.cost_usd.unwrap_or(0.0),
            a.cache_status.as_deref().unwrap_or("unknown"),
            a.latency_ms
                .map(|ms| ms.to_string())
                .unwrap_or_else(|| "?".to_string()),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ratio_rounds_to_four_places() {
        assert_eq!(ratio(1.05128), "1.0513");
        assert_eq!(ratio(-0.2), "-0.2000");
    }

    #[test]
    fn test_missing_renders_as_na() {
        assert_eq!(opt_ratio(None), "n/a");
        assert_eq!(opt_pct(None, 3), "n/a");
        assert_eq!(price(None), "n/a");
        assert_eq!(opt_fixed(None, 3), "n/a");
    }

    #[test]
    fn test_pct_converts_fraction() {
        assert_eq!(pct(0.019898, 3), "1.990%");
        assert_eq!(pct(0.0302, 1), "3.0%");
        assert_eq!(opt_pct(Some(0.5), 0), "50%");
    }

    #[test]
    fn test_agent_line() {
        let agent = AgentInfo {
            cost_usd: Some(0.0125),
            cache_status: Some("hit".to_string()),
            latency_ms: Some(42),
        };
        let line = agent_line(Some(&agent)).unwrap();
        assert!(line.contains("$0.0125"));
        assert!(line.contains("hit"));
        assert!(line.contains("42ms"));

        assert!(agent_line(None).is_none());
    }
}
