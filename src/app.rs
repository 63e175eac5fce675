use std::io::{BufRead, Write};
use std::time::Duration;

use anyhow::Result;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::debug;

use crate::api::PracticeApi;
use crate::auth::{self, AuthContext, Gate, User};
use crate::config::ClientConfig;
use crate::pages::{DashboardCommand, DashboardPage, LandingPage, StreetFilter, TrainingPage};

const AUTH_POLL: Duration = Duration::from_millis(100);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Landing,
    Login,
    Dashboard,
    Training,
}

pub struct App<A: PracticeApi> {
    api: A,
    auth: AuthContext,
    config: ClientConfig,
    rng: StdRng,
}

impl<A: PracticeApi> App<A> {
    pub fn new(api: A, auth: AuthContext, config: ClientConfig) -> Self {
        Self {
            api,
            auth,
            config,
            rng: StdRng::from_entropy(),
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    pub fn into_parts(self) -> (A, AuthContext, ClientConfig) {
        (self.api, self.auth, self.config)
    }

    pub async fn run<R: BufRead, W: Write>(&mut self, input: &mut R, output: &mut W) -> Result<()> {
        self.run_from(Route::Landing, input, output).await
    }

    pub async fn run_from<R: BufRead, W: Write>(
        &mut self,
        start: Route,
        input: &mut R,
        output: &mut W,
    ) -> Result<()> {
        let mut route = start;
        loop {
            debug!(?route, "entering route");
            let next = match route {
                Route::Landing => self.landing(input, output).await?,
                Route::Login => self.login(input, output)?,
                Route::Dashboard => self.dashboard(input, output).await?,
                Route::Training => self.training(input, output).await?,
            };
            match next {
                Some(next) => route = next,
                None => break,
            }
        }
        Ok(())
    }

    async fn landing<R: BufRead, W: Write>(
        &mut self,
        input: &mut R,
        output: &mut W,
    ) -> Result<Option<Route>> {
        let mut page = LandingPage::new();
        page.load(&self.api).await;
        write_lines(output, page.render(self.config.color()))?;

        let Some(line) = prompt(input, output, "Press Enter to continue (q to quit): ")? else {
            return Ok(None);
        };
        if line.eq_ignore_ascii_case("q") {
            return Ok(None);
        }
        Ok(Some(Route::Dashboard))
    }

    fn login<R: BufRead, W: Write>(
        &mut self,
        input: &mut R,
        output: &mut W,
    ) -> Result<Option<Route>> {
        writeln!(output, "Sign in to continue.")?;
        loop {
            let Some(email) = prompt(input, output, "Email (q to quit): ")? else {
                return Ok(None);
            };
            if email.eq_ignore_ascii_case("q") {
                return Ok(None);
            }
            match self.auth.provider().sign_in(&email) {
                Ok(_) => return Ok(Some(Route::Dashboard)),
                Err(err) => writeln!(output, "{err}")?,
            }
        }
    }

    async fn gate<W: Write>(&self, output: &mut W) -> Result<Result<User, Route>> {
        let mut announced = false;
        loop {
            match auth::guard(&self.auth) {
                Gate::Allow(user) => return Ok(Ok(user)),
                Gate::Redirect(route) => return Ok(Err(route)),
                Gate::Pending => {
                    if !announced {
                        writeln!(output, "Loading...")?;
                        announced = true;
                    }
                    tokio::time::sleep(AUTH_POLL).await;
                }
            }
        }
    }

    async fn dashboard<R: BufRead, W: Write>(
        &mut self,
        input: &mut R,
        output: &mut W,
    ) -> Result<Option<Route>> {
        let user = match self.gate(output).await? {
            Ok(user) => user,
            Err(route) => return Ok(Some(route)),
        };
        let page = DashboardPage::new(user);
        write_lines(output, page.render(self.config.color()))?;

        loop {
            let Some(line) = prompt(input, output, "> ")? else {
                return Ok(None);
            };
            match DashboardCommand::parse(&line) {
                Some(DashboardCommand::StartTraining) => return Ok(Some(Route::Training)),
                Some(DashboardCommand::SignOut) => {
                    let next = auth::sign_out(&self.auth, Route::Dashboard).await;
                    if next != Route::Dashboard {
                        return Ok(Some(next));
                    }
                }
                Some(DashboardCommand::Quit) => return Ok(None),
                None => writeln!(output, "Unknown command. Use t, s or q.")?,
            }
        }
    }

    async fn training<R: BufRead, W: Write>(
        &mut self,
        input: &mut R,
        output: &mut W,
    ) -> Result<Option<Route>> {
        if let Err(route) = self.gate(output).await? {
            return Ok(Some(route));
        }
        let color = self.config.color();
        let api = &self.api;
        let mut page = TrainingPage::new(&mut self.rng);
        page.load(api).await;

        loop {
            write_lines(output, page.render(color))?;
            let Some(line) = prompt(input, output, "> ")? else {
                return Ok(None);
            };
            let command = line.to_lowercase();
            match command.as_str() {
                "q" => return Ok(None),
                "b" => return Ok(Some(Route::Dashboard)),
                "n" => page.next_scenario(api).await,
                _ if command == "f" || command.starts_with("f ") => {
                    let value = command.trim_start_matches('f').trim();
                    match StreetFilter::parse(value) {
                        Some(filter) => {
                            page.set_filter(filter);
                            page.next_scenario(api).await;
                        }
                        None => writeln!(
                            output,
                            "Unknown street '{value}'. Use all, pre-flop, post-flop, turn or river."
                        )?,
                    }
                }
                _ => match command.parse::<usize>() {
                    Ok(index) if page.actions_enabled() => {
                        let label = page
                            .scenario()
                            .and_then(|scenario| {
                                scenario
                                    .action_labels()
                                    .get(index.wrapping_sub(1))
                                    .map(|label| label.to_string())
                            });
                        match label {
                            Some(label) => {
                                page.submit(api, &label).await;
                            }
                            None => writeln!(output, "Invalid selection. Try again.")?,
                        }
                    }
                    Ok(_) if page.scenario().is_none() => {
                        writeln!(output, "No scenario to answer. Press n to fetch another.")?
                    }
                    Ok(_) => writeln!(output, "Actions are locked for this scenario.")?,
                    Err(_) => writeln!(
                        output,
                        "Commands: action number, n = next, f <street> = filter, b = back, q = quit"
                    )?,
                },
            }
        }
    }
}

fn write_lines<W: Write>(output: &mut W, lines: Vec<String>) -> Result<()> {
    for line in lines {
        writeln!(output, "{line}")?;
    }
    Ok(())
}

fn prompt<R: BufRead, W: Write>(input: &mut R, output: &mut W, text: &str) -> Result<Option<String>> {
    write!(output, "{text}")?;
    output.flush()?;
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        writeln!(output)?;
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}
