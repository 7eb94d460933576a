//! HTML pages rendered with minijinja. Values are HTML-escaped.

use minijinja::{Environment, Error as TemplateError, context};

const INDEX_TEMPLATE: &str = "index.html";
const DASHBOARD_TEMPLATE: &str = "dashboard.html";

pub struct Pages {
    env: Environment<'static>,
}

impl Pages {
    pub fn new() -> Result<Self, TemplateError> {
        let mut env = Environment::new();
        env.add_template(INDEX_TEMPLATE, include_str!("../templates/index.html"))?;
        env.add_template(DASHBOARD_TEMPLATE, include_str!("../templates/dashboard.html"))?;

        Ok(Self { env })
    }

    /// Landing page with the login widget pointing at `auth_url`
    pub fn index(&self, bot_username: &str, auth_url: &str) -> Result<String, TemplateError> {
        self.env
            .get_template(INDEX_TEMPLATE)?
            .render(context! { bot_username, auth_url })
    }

    /// Dashboard for a logged-in user; `send_key` is None while pending
    pub fn dashboard(
        &self,
        first_name: &str,
        send_key: Option<&str>,
        bot_username: &str,
        send_url: &str,
    ) -> Result<String, TemplateError> {
        self.env.get_template(DASHBOARD_TEMPLATE)?.render(context! {
            first_name,
            send_key,
            bot_username,
            send_url,
        })
    }
}
