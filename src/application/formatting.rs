use crate::domain::types::Forecast;
use serde::Serialize;
use std::str::FromStr;

/// Delivery channel for a rendered forecast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    Sms,
    Whatsapp,
    Bulletin,
}

impl FromStr for Channel {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "sms" => Ok(Channel::Sms),
            "whatsapp" => Ok(Channel::Whatsapp),
            "bulletin" => Ok(Channel::Bulletin),
            _ => anyhow::bail!(
                "Invalid channel: {}. Must be 'sms', 'whatsapp', or 'bulletin'",
                s
            ),
        }
    }
}

/// Cost of a single SMS in KES.
const SMS_COST_KES: f64 = 0.50;

#[derive(Debug, Clone, Serialize)]
pub struct FormattedMessage {
    pub channel: Channel,
    pub body: String,
    pub character_count: usize,
    pub estimated_cost: Option<f64>,
}

/// Render a forecast for non-technical audiences. One English template set;
/// SMS stays a single line to fit one message, the bulletin is laid out for
/// printing.
pub fn format_forecast(forecast: &Forecast, channel: Channel) -> FormattedMessage {
    let (body, estimated_cost) = match channel {
        Channel::Sms => (
            format!(
                "{} @ {}: KES {}/kg on {}. Prev: KES {}/kg",
                forecast.commodity,
                forecast.market,
                forecast.predicted_per_kg,
                forecast.date,
                forecast.previous_price
            ),
            Some(SMS_COST_KES),
        ),
        Channel::Whatsapp => (whatsapp_body(forecast), Some(0.0)),
        Channel::Bulletin => (bulletin_body(forecast), None),
    };

    FormattedMessage {
        channel,
        character_count: body.chars().count(),
        body,
        estimated_cost,
    }
}

fn whatsapp_body(forecast: &Forecast) -> String {
    format!(
        "\u{1F4CA} *Market Price Forecast*\n\
         \n\
         Commodity: {}\n\
         Market: {}\n\
         Date: {}\n\
         \n\
         Predicted Price: *KES {}/kg*\n\
         Previous Price: KES {}/kg\n\
         Confidence: {}%\n\
         \n\
         {}\n\
         \n\
         _Powered by Market Forecaster_",
        forecast.commodity,
        forecast.market,
        forecast.date,
        forecast.predicted_per_kg,
        forecast.previous_price,
        forecast.confidence_pct,
        forecast.note
    )
}

fn bulletin_body(forecast: &Forecast) -> String {
    let rule = "=".repeat(50);
    format!(
        "MARKET PRICE BULLETIN\n\
         {rule}\n\
         \n\
         Commodity:          {}\n\
         Market Location:    {}\n\
         Forecast Date:      {}\n\
         \n\
         PRICE FORECAST\n\
         {rule}\n\
         Predicted Price:    KES {} per kg\n\
         Previous Price:     KES {} per kg\n\
         Price Range:        KES {} - {} per kg\n\
         Confidence Level:   {}%\n\
         \n\
         NOTES\n\
         {rule}\n\
         {}\n\
         \n\
         This forecast is provided as guidance only. Actual market prices may vary.",
        forecast.commodity.to_uppercase(),
        forecast.market,
        forecast.date,
        forecast.predicted_per_kg,
        forecast.previous_price,
        forecast.lower_bound,
        forecast.upper_bound,
        forecast.confidence_pct,
        forecast.note
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::PriceType;

    fn forecast() -> Forecast {
        Forecast {
            commodity: "cabbage".to_string(),
            market: "Gikomba".to_string(),
            date: "2025-12-05".to_string(),
            predicted_per_kg: 55.0,
            unit: "kg".to_string(),
            price_type: PriceType::Retail,
            previous_price: 100.0,
            confidence_pct: 90.0,
            error_margin: "+-39.5".to_string(),
            lower_bound: 14.5,
            upper_bound: 94.5,
            unreasonable: false,
            note: "Prediction within normal range.".to_string(),
        }
    }

    #[test]
    fn test_sms_is_single_line_with_cost() {
        let msg = format_forecast(&forecast(), Channel::Sms);
        assert!(!msg.body.contains('\n'));
        assert!(msg.body.contains("cabbage @ Gikomba"));
        assert!(msg.body.contains("KES 55/kg"));
        assert_eq!(msg.estimated_cost, Some(0.50));
        assert_eq!(msg.character_count, msg.body.chars().count());
    }

    #[test]
    fn test_whatsapp_is_free_and_carries_note() {
        let msg = format_forecast(&forecast(), Channel::Whatsapp);
        assert_eq!(msg.estimated_cost, Some(0.0));
        assert!(msg.body.contains("*Market Price Forecast*"));
        assert!(msg.body.contains("Prediction within normal range."));
        assert!(msg.body.contains("Confidence: 90%"));
    }

    #[test]
    fn test_bulletin_carries_price_range() {
        let msg = format_forecast(&forecast(), Channel::Bulletin);
        assert_eq!(msg.estimated_cost, None);
        assert!(msg.body.contains("MARKET PRICE BULLETIN"));
        assert!(msg.body.contains("CABBAGE"));
        assert!(msg.body.contains("KES 14.5 - 94.5 per kg"));
    }

    #[test]
    fn test_channel_parsing() {
        assert_eq!("SMS".parse::<Channel>().unwrap(), Channel::Sms);
        assert_eq!(" WhatsApp ".parse::<Channel>().unwrap(), Channel::Whatsapp);
        assert!("email".parse::<Channel>().is_err());
    }
}
