pub fn mean(data: &[f64]) -> Option<f64> {
    match data.len() {
        0 => None,
        count => Some(data.iter().sum::<f64>() / count as f64),
    }
}

/// Formats an amount with at most `decimals` places, dropping trailing zeros
pub fn format_amount(value: f64, decimals: usize) -> String {
    let fixed = format!("{:.*}", decimals, value);
    if fixed.contains('.') {
        fixed.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        fixed
    }
}
