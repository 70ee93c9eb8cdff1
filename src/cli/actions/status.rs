use crate::{
    cli::globals::GlobalArgs,
    routes::{FilterDecision, RouteClass, RouteTable},
    session::{SessionStore, SessionToken},
};
use anyhow::Result;
use chrono::{DateTime, Utc};
use std::fmt;

#[derive(Debug)]
pub struct Args {
    pub globals: GlobalArgs,
    pub path: String,
}

/// What each gate would do for one path, given the stored session.
#[derive(Debug, PartialEq, Eq)]
pub struct Report {
    pub path: String,
    pub class: RouteClass,
    pub cookie_present: bool,
    pub expires_at: Option<i64>,
    pub session_valid: bool,
    pub filter: FilterDecision,
    pub guard: GuardVerdict,
}

#[derive(Debug, PartialEq, Eq)]
pub enum GuardVerdict {
    /// The page never reaches the client guard.
    NotReached,
    Render,
    /// Stale session evicted, client navigates to login.
    Redirect(String),
}

impl Report {
    /// Read-only: unlike a mounted guard, building a report never evicts.
    #[must_use]
    pub fn new(session: &SessionStore, routes: &RouteTable, path: &str, now: i64) -> Self {
        let cookie_present = session.cookie_token().is_some();
        let class = routes.classify(path);
        let filter = routes.decide(path, cookie_present);
        let session_valid = session.is_valid_at(now);

        let guard = match (&filter, class) {
            (FilterDecision::PassThrough, RouteClass::Protected) if session_valid => {
                GuardVerdict::Render
            }
            (FilterDecision::PassThrough, RouteClass::Protected) => {
                GuardVerdict::Redirect(routes.login_path.clone())
            }
            _ => GuardVerdict::NotReached,
        };

        Self {
            path: path.to_string(),
            class,
            cookie_present,
            expires_at: session
                .token()
                .and_then(|raw| SessionToken::parse(&raw).ok())
                .map(|token| token.expires_at()),
            session_valid,
            filter,
            guard,
        }
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "path:     {} ({:?})", self.path, self.class)?;
        writeln!(
            f,
            "cookie:   {}",
            if self.cookie_present { "present" } else { "absent" }
        )?;
        match self.expires_at.and_then(|exp| DateTime::<Utc>::from_timestamp(exp, 0)) {
            Some(exp) => writeln!(f, "session:  valid={} expires={}", self.session_valid, exp.to_rfc3339())?,
            None => writeln!(f, "session:  valid={}", self.session_valid)?,
        }
        match &self.filter {
            FilterDecision::PassThrough => writeln!(f, "filter:   pass through")?,
            FilterDecision::Redirect(location) => writeln!(f, "filter:   redirect {location}")?,
        }
        match &self.guard {
            GuardVerdict::NotReached => write!(f, "guard:    not reached"),
            GuardVerdict::Render => write!(f, "guard:    render"),
            GuardVerdict::Redirect(location) => write!(f, "guard:    evict and navigate to {location}"),
        }
    }
}

/// # Errors
/// Never fails today; kept fallible like the other actions.
pub fn execute(args: &Args) -> Result<()> {
    let session = SessionStore::from_profile(&args.globals.profile());
    let report = Report::new(&session, &args.globals.routes, &args.path, Utc::now().timestamp());
    println!("{report}");
    Ok(())
}
