//! Named actions over the client, for shells and scripts.
//!
//! A [`CommandTable`] maps an action name such as `quote` or
//! `create_watchlist` to a handler taking positional string arguments. The
//! handler parses what it needs, calls the matching service method and
//! returns the unwrapped payload as JSON.
//!
//! # Example
//!
//! ```no_run
//! use tradier_rs::commands::CommandTable;
//! use tradier_rs::{Endpoint, TradierClient};
//!
//! # async fn example() -> tradier_rs::Result<()> {
//! let client = TradierClient::new("access-token", Endpoint::Sandbox)?;
//! let table = CommandTable::standard();
//!
//! let args = vec!["AAPL,MSFT".to_string()];
//! if let Some(command) = table.get("quote") {
//!     let quotes = command.call(&client, &args).await?;
//!     println!("{}", quotes);
//! }
//! # Ok(())
//! # }
//! ```

use std::collections::BTreeMap;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime};
use futures_util::future::BoxFuture;
use serde::Serialize;
use serde_json::Value;

use crate::api::{EventsQuery, HistoryQuery, TimesalesQuery};
use crate::client::Params;
use crate::{AccountId, Error, OrderId, Result, Symbols, TradierClient, WatchlistId};

/// Signature shared by every action handler.
pub type Handler = for<'a> fn(&'a TradierClient, Args<'a>) -> BoxFuture<'a, Result<Value>>;

/// Positional arguments handed to a handler.
#[derive(Debug, Clone, Copy)]
pub struct Args<'a>(&'a [String]);

impl<'a> Args<'a> {
    /// Wrap a slice of raw arguments.
    pub fn new(args: &'a [String]) -> Self {
        Self(args)
    }

    /// The argument at `index`, if given.
    pub fn optional(&self, index: usize) -> Option<&'a str> {
        self.0.get(index).map(String::as_str)
    }

    /// The argument at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] naming `name` when it is missing.
    pub fn required(&self, index: usize, name: &str) -> Result<&'a str> {
        self.optional(index)
            .ok_or_else(|| Error::InvalidInput(format!("missing argument <{}>", name)))
    }

    /// Parse the argument at `index` if given.
    pub fn parse<T>(&self, index: usize, name: &str) -> Result<Option<T>>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        self.optional(index)
            .map(|raw| {
                raw.parse::<T>()
                    .map_err(|e| Error::InvalidInput(format!("invalid <{}> `{}`: {}", name, raw, e)))
            })
            .transpose()
    }

    fn date(&self, index: usize, name: &str) -> Result<Option<NaiveDate>> {
        self.optional(index)
            .map(|raw| {
                NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                    .map_err(|e| Error::InvalidInput(format!("invalid <{}> `{}`: {}", name, raw, e)))
            })
            .transpose()
    }

    fn datetime(&self, index: usize, name: &str) -> Result<Option<NaiveDateTime>> {
        self.optional(index)
            .map(|raw| {
                NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M")
                    .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M"))
                    .map_err(|e| Error::InvalidInput(format!("invalid <{}> `{}`: {}", name, raw, e)))
            })
            .transpose()
    }

    fn account(&self, index: usize) -> Result<AccountId> {
        self.required(index, "account").map(AccountId::new)
    }

    fn order(&self, index: usize) -> Result<OrderId> {
        self.required(index, "order").map(OrderId::new)
    }

    fn watchlist(&self, index: usize) -> Result<WatchlistId> {
        self.required(index, "id").map(WatchlistId::new)
    }

    fn symbols(&self, index: usize) -> Result<Symbols> {
        self.required(index, "symbols").map(Symbols::from)
    }

    /// A form body given as `key=value&key=value`.
    fn form(&self, index: usize) -> Result<Params> {
        self.required(index, "fields").map(Params::parse)
    }
}

/// A named action.
#[derive(Clone, Copy)]
pub struct Command {
    name: &'static str,
    usage: &'static str,
    handler: Handler,
}

impl Command {
    /// The action name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Positional arguments, e.g. `<account> [order]`.
    pub fn usage(&self) -> &'static str {
        self.usage
    }

    /// Run the action.
    pub async fn call(&self, client: &TradierClient, args: &[String]) -> Result<Value> {
        (self.handler)(client, Args::new(args)).await
    }
}

impl std::fmt::Debug for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Command")
            .field("name", &self.name)
            .field("usage", &self.usage)
            .finish()
    }
}

/// Lookup table from action name to handler.
#[derive(Debug, Clone, Default)]
pub struct CommandTable {
    commands: BTreeMap<&'static str, Command>,
}

impl CommandTable {
    /// An empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Every resource the client exposes.
    pub fn standard() -> Self {
        let mut table = Self::new();

        // user
        table.register("profile", "", profile);
        table.register("balances", "", user_balances);
        table.register("positions", "", user_positions);
        table.register("history", "", user_history);
        table.register("gainloss", "", user_gainloss);
        table.register("orders", "", user_orders);

        // accounts
        table.register("account_balances", "<account>", account_balances);
        table.register("account_positions", "<account>", account_positions);
        table.register("account_history", "<account>", account_history);
        table.register("account_gainloss", "<account>", account_gainloss);
        table.register("account_orders", "<account>", account_orders);
        table.register("account_order", "<account> <order>", account_order);

        // trading
        table.register("create_order", "<account> <fields>", create_order);
        table.register("preview_order", "<account> <fields>", preview_order);
        table.register("change_order", "<account> <order> <fields>", change_order);
        table.register("cancel_order", "<account> <order>", cancel_order);

        // markets
        table.register("quote", "<symbols>", quote);
        table.register(
            "timesales",
            "<symbol> [interval] [start] [end] [session_filter]",
            timesales,
        );
        table.register("option_chains", "<symbol> <expiration>", option_chains);
        table.register("option_strikes", "<symbol> <expiration>", option_strikes);
        table.register("option_expirations", "<symbol> [include_all_roots]", option_expirations);
        table.register("price_history", "<symbol> [interval] [start] [end]", price_history);
        table.register("clock", "", clock);
        table.register("calendar", "[month] [year]", calendar);
        table.register("search", "<q> [indexes]", search);
        table.register("lookup", "<q> [exchanges] [types]", lookup);

        // fundamentals
        table.register("company", "<symbols>", company);
        table.register("calendars", "<symbols>", calendars);
        table.register("dividends", "<symbols>", dividends);
        table.register("corporate_actions", "<symbols>", corporate_actions);
        table.register("ratios", "<symbols>", ratios);
        table.register("financials", "<symbols>", financials);
        table.register("statistics", "<symbols>", statistics);

        // watchlists
        table.register("watchlists", "", watchlists);
        table.register("watchlist", "<id>", watchlist);
        table.register("create_watchlist", "<name> <symbols>", create_watchlist);
        table.register("update_watchlist", "<id> <name> <symbols>", update_watchlist);
        table.register("delete_watchlist", "<id>", delete_watchlist);
        table.register("add_symbols", "<id> <symbols>", add_symbols);
        table.register("remove_symbol", "<id> <symbol>", remove_symbol);

        // streaming
        table.register("create_session", "", create_session);
        table.register("events", "<sessionid> <symbols> [filter] [linebreak]", events);

        table
    }

    /// Add or replace an action.
    pub fn register(&mut self, name: &'static str, usage: &'static str, handler: Handler) {
        self.commands.insert(
            name,
            Command {
                name,
                usage,
                handler,
            },
        );
    }

    /// Look up an action; `None` if the name is unknown.
    pub fn get(&self, name: &str) -> Option<&Command> {
        self.commands.get(name)
    }

    /// All actions, sorted by name.
    pub fn iter(&self) -> impl Iterator<Item = &Command> {
        self.commands.values()
    }

    /// Number of registered actions.
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Returns `true` if no actions are registered.
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

fn to_value<T: Serialize>(value: T) -> Result<Value> {
    Ok(serde_json::to_value(value)?)
}

/// Define a handler whose body evaluates to any serializable payload.
macro_rules! handler {
    ($name:ident, |$client:ident, $args:ident| $body:expr) => {
        #[allow(unused_variables)]
        fn $name<'a>($client: &'a TradierClient, $args: Args<'a>) -> BoxFuture<'a, Result<Value>> {
            Box::pin(async move { to_value($body) })
        }
    };
}

handler!(profile, |c, a| c.user().profile().await?);
handler!(user_balances, |c, a| c.user().balances().await?);
handler!(user_positions, |c, a| c.user().positions().await?);
handler!(user_history, |c, a| c.user().history().await?);
handler!(user_gainloss, |c, a| c.user().gainloss().await?);
handler!(user_orders, |c, a| c.user().orders().await?);

handler!(account_balances, |c, a| c.accounts().balances(&a.account(0)?).await?);
handler!(account_positions, |c, a| c.accounts().positions(&a.account(0)?).await?);
handler!(account_history, |c, a| c.accounts().history(&a.account(0)?).await?);
handler!(account_gainloss, |c, a| c.accounts().gainloss(&a.account(0)?).await?);
handler!(account_orders, |c, a| c.accounts().orders(&a.account(0)?).await?);
handler!(account_order, |c, a| {
    c.accounts().order(&a.account(0)?, &a.order(1)?).await?
});

handler!(create_order, |c, a| c.orders().create(&a.account(0)?, a.form(1)?).await?);
handler!(preview_order, |c, a| c.orders().preview(&a.account(0)?, a.form(1)?).await?);
handler!(change_order, |c, a| {
    c.orders().change(&a.account(0)?, &a.order(1)?, a.form(2)?).await?
});
handler!(cancel_order, |c, a| c.orders().cancel(&a.account(0)?, &a.order(1)?).await?);

handler!(quote, |c, a| c.markets().quotes(a.symbols(0)?).await?);
handler!(timesales, |c, a| {
    let query = TimesalesQuery {
        symbol: a.required(0, "symbol")?.to_string(),
        interval: a.parse(1, "interval")?,
        start: a.datetime(2, "start")?,
        end: a.datetime(3, "end")?,
        session_filter: a.parse(4, "session_filter")?,
    };
    c.markets().timesales(query).await?
});
handler!(option_chains, |c, a| {
    let expiration = a.date(1, "expiration")?;
    let expiration = expiration.ok_or_else(|| Error::InvalidInput("missing argument <expiration>".into()))?;
    c.markets().option_chains(a.required(0, "symbol")?, expiration).await?
});
handler!(option_strikes, |c, a| {
    let expiration = a.date(1, "expiration")?;
    let expiration = expiration.ok_or_else(|| Error::InvalidInput("missing argument <expiration>".into()))?;
    c.markets().option_strikes(a.required(0, "symbol")?, expiration).await?
});
handler!(option_expirations, |c, a| {
    c.markets()
        .option_expirations(a.required(0, "symbol")?, a.parse(1, "include_all_roots")?)
        .await?
});
handler!(price_history, |c, a| {
    let query = HistoryQuery {
        symbol: a.required(0, "symbol")?.to_string(),
        interval: a.parse(1, "interval")?,
        start: a.date(2, "start")?,
        end: a.date(3, "end")?,
    };
    c.markets().history(query).await?
});
handler!(clock, |c, a| c.markets().clock().await?);
handler!(calendar, |c, a| {
    c.markets().calendar(a.parse(0, "month")?, a.parse(1, "year")?).await?
});
handler!(search, |c, a| {
    c.markets().search(a.required(0, "q")?, a.parse(1, "indexes")?).await?
});
handler!(lookup, |c, a| {
    c.markets()
        .lookup(a.required(0, "q")?, a.optional(1), a.optional(2))
        .await?
});

handler!(company, |c, a| c.fundamentals().company(a.symbols(0)?).await?);
handler!(calendars, |c, a| c.fundamentals().calendars(a.symbols(0)?).await?);
handler!(dividends, |c, a| c.fundamentals().dividends(a.symbols(0)?).await?);
handler!(corporate_actions, |c, a| {
    c.fundamentals().corporate_actions(a.symbols(0)?).await?
});
handler!(ratios, |c, a| c.fundamentals().ratios(a.symbols(0)?).await?);
handler!(financials, |c, a| c.fundamentals().financials(a.symbols(0)?).await?);
handler!(statistics, |c, a| c.fundamentals().statistics(a.symbols(0)?).await?);

handler!(watchlists, |c, a| c.watchlists().list().await?);
handler!(watchlist, |c, a| c.watchlists().get(&a.watchlist(0)?).await?);
handler!(create_watchlist, |c, a| {
    c.watchlists()
        .create(a.required(0, "name")?, a.symbols(1)?)
        .await?
});
handler!(update_watchlist, |c, a| {
    c.watchlists()
        .update(&a.watchlist(0)?, a.required(1, "name")?, a.symbols(2)?)
        .await?
});
handler!(delete_watchlist, |c, a| c.watchlists().delete(&a.watchlist(0)?).await?);
handler!(add_symbols, |c, a| {
    c.watchlists().add_symbols(&a.watchlist(0)?, a.symbols(1)?).await?
});
handler!(remove_symbol, |c, a| {
    c.watchlists()
        .remove_symbol(&a.watchlist(0)?, a.required(1, "symbol")?)
        .await?
});

handler!(create_session, |c, a| c.streaming().create_session().await?);
handler!(events, |c, a| {
    let mut query = EventsQuery::new(a.required(0, "sessionid")?, a.symbols(1)?);
    if let Some(filter) = a.optional(2) {
        query = query.filter(filter);
    }
    if let Some(linebreak) = a.parse(3, "linebreak")? {
        query = query.linebreak(linebreak);
    }
    c.streaming().events(query).await?
});

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Endpoint;

    fn args(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_standard_table_covers_every_resource() {
        let table = CommandTable::standard();
        for name in [
            "profile",
            "account_order",
            "preview_order",
            "quote",
            "timesales",
            "company",
            "remove_symbol",
            "events",
        ] {
            assert!(table.get(name).is_some(), "missing {}", name);
        }
        assert_eq!(table.len(), 42);
    }

    #[test]
    fn test_unknown_action_is_none() {
        assert!(CommandTable::standard().get("getQuote").is_none());
    }

    #[test]
    fn test_args_parsing() {
        let raw = args(&["SPY", "5min", "2019-05-09 09:30"]);
        let a = Args::new(&raw);

        assert_eq!(a.required(0, "symbol").unwrap(), "SPY");
        assert_eq!(
            a.parse::<crate::models::TimesalesInterval>(1, "interval").unwrap(),
            Some(crate::models::TimesalesInterval::FiveMinutes)
        );
        assert!(a.datetime(2, "start").unwrap().is_some());
        assert_eq!(a.optional(3), None);
        assert!(matches!(a.required(3, "end"), Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_form_argument() {
        let raw = args(&["VA000001", "class=equity&symbol=AAPL&side=buy"]);
        let form = Args::new(&raw).form(1).unwrap();
        assert_eq!(form.get("symbol"), Some("AAPL"));
    }

    #[tokio::test]
    async fn test_missing_argument_fails_before_sending() {
        // Nothing listens on this port; the argument check runs first.
        let config = crate::ClientConfig::default().with_base_url(Endpoint::Sandbox, "http://127.0.0.1:9/");
        let client = TradierClient::with_config("token", Endpoint::Sandbox, config).unwrap();
        let table = CommandTable::standard();

        let result = table.get("account_balances").unwrap().call(&client, &[]).await;
        assert!(matches!(result, Err(Error::InvalidInput(msg)) if msg.contains("<account>")));
    }
}
