use {
    anyhow::{Result, bail},
    binance_sdk::{
        config::ConfigurationRestApi,
        errors::{self, ConnectorError as connection_error},
        spot::{
            SpotRestApi,
            rest_api::{KlinesIntervalEnum, KlinesItemInner, KlinesParams, RestApi},
        },
    },
    std::{collections::HashSet, convert::TryFrom, error::Error, fmt},
};

use crate::{
    config::{BINANCE, BaseVol, BinanceApiConfig, ClosePrice, DF, HighPrice, LowPrice, OpenPrice},
    data::GlobalRateLimiter,
    domain::Candle,
    utils::{TimeUtils, epoch_ms_to_date},
};

pub fn try_interval_from_ms(ms: i64) -> Result<KlinesIntervalEnum, BNKlineError> {
    use TimeUtils as T;
    match ms {
        T::MS_IN_D => Ok(KlinesIntervalEnum::Interval1d),
        _ => Err(BNKlineError::UnsupportedInterval(ms)),
    }
}

#[derive(Debug, PartialOrd, PartialEq)]
pub struct BNKline {
    pub open_timestamp_ms: i64,
    pub open_price: Option<OpenPrice>,
    pub high_price: Option<HighPrice>,
    pub low_price: Option<LowPrice>,
    pub close_price: Option<ClosePrice>,
    pub base_asset_volume: Option<BaseVol>,
}

#[derive(Debug, PartialEq)]
pub enum BNKlineError {
    InvalidLength,
    InvalidType(String),
    UnsupportedInterval(i64),
    ConnectionFailed(String),
}

impl fmt::Display for BNKlineError {
    fn fmt(&self, f: &mut fmt::Formatter) -> std::fmt::Result {
        match self {
            BNKlineError::InvalidLength => write!(f, "Invalid length"),
            BNKlineError::InvalidType(string) => write!(f, "Invalid type: {}", string),
            BNKlineError::UnsupportedInterval(ms) => write!(f, "Unsupported interval: {}ms", ms),
            BNKlineError::ConnectionFailed(msg) => {
                write!(f, "Binance API connection failed: {}.", msg)
            }
        }
    }
}

impl Error for BNKlineError {}

fn parse_decimal(item: Option<KlinesItemInner>) -> Option<f64> {
    match item? {
        KlinesItemInner::String(s) => s.parse::<f64>().ok(),
        _ => None,
    }
}

impl TryFrom<Vec<KlinesItemInner>> for BNKline {
    type Error = BNKlineError;

    /// Binance kline layout: open_time, open, high, low, close, volume, close_time, ...
    fn try_from(raw: Vec<KlinesItemInner>) -> Result<Self, Self::Error> {
        let mut items = raw.into_iter();
        let open_timestamp_ms = match items.next().ok_or(BNKlineError::InvalidLength)? {
            KlinesItemInner::Integer(a) => a,
            _ => return Err(BNKlineError::InvalidType("open_time".to_string())),
        };

        Ok(BNKline {
            open_timestamp_ms,
            open_price: parse_decimal(items.next()).map(OpenPrice::new),
            high_price: parse_decimal(items.next()).map(HighPrice::new),
            low_price: parse_decimal(items.next()).map(LowPrice::new),
            close_price: parse_decimal(items.next()).map(ClosePrice::new),
            base_asset_volume: parse_decimal(items.next()).map(BaseVol::new),
        })
    }
}

fn convert_klines(data: Vec<Vec<KlinesItemInner>>) -> Result<Vec<BNKline>, BNKlineError> {
    data.into_iter().map(Vec::try_into).collect()
}

fn configure_binance_client() -> Result<RestApi> {
    let config = BinanceApiConfig::default();
    let rest_conf = ConfigurationRestApi::builder()
        .timeout(config.timeout_ms)
        .retries(config.retries)
        .backoff(config.backoff_ms)
        .build()?;
    Ok(SpotRestApi::production(rest_conf))
}

async fn fetch_kline_page(
    rest_client: &RestApi,
    params: KlinesParams,
    pair: &str,
) -> Result<Vec<Vec<KlinesItemInner>>> {
    match rest_client.klines(params).await {
        Ok(r) => Ok(r.data().await?),
        Err(e) => {
            let Some(conn_err) = e.downcast_ref::<errors::ConnectorError>() else {
                log::error!("An unexpected error occurred for {}: {:#}", pair, e);
                return Err(anyhow::Error::new(BNKlineError::ConnectionFailed(e.to_string()))
                    .context(format!("Unexpected error during API call for {}", pair)));
            };
            match conn_err {
                connection_error::ConnectorClientError(msg)
                | connection_error::BadRequestError(msg) => {
                    log::error!("{} Client error: check request parameters. {}", pair, msg);
                }
                connection_error::TooManyRequestsError(msg)
                | connection_error::RateLimitBanError(msg) => {
                    log::error!("{} Rate limit exceeded or IP banned. {}", pair, msg);
                }
                errors::ConnectorError::ServerError { msg, status_code } => {
                    log::error!(
                        "{} Server error: {} (status code: {:?})",
                        pair,
                        msg,
                        status_code
                    );
                }
                errors::ConnectorError::NetworkError(msg) => {
                    log::error!("{} Network error: check your internet connection. {}", pair, msg);
                }
                other => {
                    log::error!("{} Unexpected connector error: {:?}", pair, other);
                }
            }
            Err(
                anyhow::Error::new(BNKlineError::ConnectionFailed(conn_err.to_string()))
                    .context(format!("Binance API call failed for {}", pair)),
            )
        }
    }
}

/// Pages forward through `[start_ms, end_ms]` until a short page or the end is reached.
pub async fn load_klines(
    pair: &str,
    interval_ms: i64,
    start_ms: i64,
    end_ms: i64,
    limiter: &GlobalRateLimiter,
) -> Result<Vec<BNKline>> {
    let rest_client = configure_binance_client()?;
    let page_limit = BINANCE.limits.klines_limit;

    let mut cursor = start_ms;
    let mut all_klines: Vec<BNKline> = Vec::new();

    while cursor <= end_ms {
        limiter.acquire(BINANCE.limits.kline_call_weight, pair).await;

        let params = KlinesParams::builder(pair.to_string(), try_interval_from_ms(interval_ms)?)
            .limit(page_limit)
            .start_time(Some(cursor))
            .end_time(Some(end_ms))
            .build()?;

        let page = convert_klines(fetch_kline_page(&rest_client, params, pair).await?)
            .map_err(|e| anyhow::Error::new(e).context(format!("{} convert_klines failed", pair)))?;

        if DF.log_fetch_pages {
            log::info!(
                "{}: page from {:?} returned {} klines",
                pair,
                epoch_ms_to_date(cursor),
                page.len()
            );
        }

        let page_len = page.len();
        let Some(last_open) = page.last().map(|k| k.open_timestamp_ms) else {
            break;
        };
        all_klines.extend(page);

        if page_len < page_limit as usize {
            break;
        }
        cursor = last_open + interval_ms;
    }

    if has_duplicate_kline_open_time(&all_klines) {
        bail!("{}: duplicate kline open times across pages", pair);
    }
    Ok(all_klines)
}

fn has_duplicate_kline_open_time(klines: &[BNKline]) -> bool {
    let mut seen = HashSet::new();
    klines.iter().any(|k| !seen.insert(k.open_timestamp_ms))
}

fn required<T>(value: Option<T>, field: &str) -> Result<T, BNKlineError> {
    value.ok_or_else(|| BNKlineError::InvalidType(field.to_string()))
}

impl TryFrom<BNKline> for Candle {
    type Error = BNKlineError;

    /// A kline with any missing or unparsable price field is rejected outright.
    fn try_from(bn: BNKline) -> Result<Self, Self::Error> {
        Ok(Candle::new(
            bn.open_timestamp_ms,
            required(bn.open_price, "open")?,
            required(bn.high_price, "high")?,
            required(bn.low_price, "low")?,
            required(bn.close_price, "close")?,
            required(bn.base_asset_volume, "volume")?,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw_kline(open_time: i64, close: &str) -> Vec<KlinesItemInner> {
        vec![
            KlinesItemInner::Integer(open_time),
            KlinesItemInner::String("1.0".to_string()),
            KlinesItemInner::String("3.0".to_string()),
            KlinesItemInner::String("0.5".to_string()),
            KlinesItemInner::String(close.to_string()),
            KlinesItemInner::String("42.0".to_string()),
            KlinesItemInner::Integer(open_time + TimeUtils::MS_IN_D - 1),
        ]
    }

    #[test]
    fn kline_fields_parse_in_binance_order() {
        let kline = BNKline::try_from(raw_kline(1_000, "2.5")).unwrap();
        assert_eq!(kline.open_timestamp_ms, 1_000);
        assert_eq!(kline.high_price, Some(HighPrice::new(3.0)));
        assert_eq!(kline.close_price, Some(ClosePrice::new(2.5)));
        assert_eq!(kline.base_asset_volume, Some(BaseVol::new(42.0)));
    }

    #[test]
    fn malformed_decimal_rejects_the_candle() {
        let good = BNKline::try_from(raw_kline(1_000, "100.0")).unwrap();
        assert_eq!(
            Candle::try_from(good).map(|c| c.close_price),
            Ok(ClosePrice::new(100.0))
        );

        let blank = BNKline::try_from(raw_kline(2_000, "")).unwrap();
        assert_eq!(blank.close_price, None);
        assert!(matches!(
            Candle::try_from(blank),
            Err(BNKlineError::InvalidType(field)) if field == "close"
        ));

        let mut raw = raw_kline(3_000, "102.0");
        raw[5] = KlinesItemInner::String("n/a".to_string());
        let no_volume = BNKline::try_from(raw).unwrap();
        assert!(matches!(
            Candle::try_from(no_volume),
            Err(BNKlineError::InvalidType(field)) if field == "volume"
        ));
    }

    #[test]
    fn non_integer_open_time_is_rejected() {
        let mut raw = raw_kline(1_000, "2.5");
        raw[0] = KlinesItemInner::String("1000".to_string());
        assert!(matches!(BNKline::try_from(raw), Err(BNKlineError::InvalidType(_))));
        assert!(matches!(BNKline::try_from(vec![]), Err(BNKlineError::InvalidLength)));
    }

    #[test]
    fn only_daily_interval_maps() {
        assert!(try_interval_from_ms(TimeUtils::MS_IN_D).is_ok());
        assert!(matches!(
            try_interval_from_ms(TimeUtils::MS_IN_H),
            Err(BNKlineError::UnsupportedInterval(ms)) if ms == TimeUtils::MS_IN_H
        ));
        assert!(try_interval_from_ms(12_345).is_err());
    }

    #[test]
    fn duplicate_open_times_are_detected() {
        let a = BNKline::try_from(raw_kline(1, "1")).unwrap();
        let b = BNKline::try_from(raw_kline(1, "2")).unwrap();
        assert!(has_duplicate_kline_open_time(&[a, b]));
    }
}
