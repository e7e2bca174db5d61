//! # Read-Eval-Print Loop
//!
//! Reads one command per line, runs it against the session and prints the
//! result. Errors are printed and the loop continues; only end of input,
//! `quit` or a failed write stops it.
//!
//! ## Session Example
//! ```text
//! > add P001 2
//! ╭──────┬───────────────────────┬─────┬───────┬────────╮
//! │ ID   │ Product               │ Qty │  Unit │  Total │
//! ├──────┼───────────────────────┼─────┼───────┼────────┤
//! │ P001 │ Specialty coffee 340g │   2 │ $7.50 │ $15.00 │
//! ╰──────┴───────────────────────┴─────┴───────┴────────╯
//!   Subtotal: $15.00
//!  Tax (13%):  $1.95
//!      Total: $16.95
//! > checkout
//! ...
//! > confirm
//! Confirm purchase of invoice F-20261015-143207-482? [y/N] y
//! Purchase confirmed! Invoice #F-20261015-143207-482 (2 items, $16.95). Inventory updated.
//! ```
//!
//! Line parsing uses clap, so `help` and `help <command>` come for free.

use std::io::{self, BufRead, Write};

use clap::error::ErrorKind;
use clap::{Parser, Subcommand};
use tracing::{debug, info};

use crate::commands::{cart, checkout, product};
use crate::error::{ApiError, ErrorCode};
use crate::render;
use crate::state::{ConfigState, Session};

const PROMPT: &str = "> ";

/// One line of input.
#[derive(Debug, Parser)]
#[command(
    name = "till",
    no_binary_name = true,
    disable_version_flag = true,
    help_template = "Commands:\n{subcommands}"
)]
struct Line {
    #[command(subcommand)]
    command: ReplCommand,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum ReplCommand {
    /// List products with live stock
    #[command(visible_alias = "ls")]
    Products,

    /// Show the cart and totals
    Cart,

    /// Add a product to the cart (quantity defaults to 1)
    Add {
        product_id: String,
        #[arg(allow_hyphen_values = true)]
        quantity: Option<String>,
    },

    /// Remove a product from the cart
    #[command(visible_alias = "rm")]
    Remove { product_id: String },

    /// Set a cart line's quantity; 0 or less removes it
    Qty {
        product_id: String,
        #[arg(allow_hyphen_values = true)]
        quantity: String,
    },

    /// Empty the cart (asks first)
    Clear,

    /// Create a pending invoice from the cart
    Checkout,

    /// Show the pending invoice
    Invoice {
        /// Print the invoice as JSON
        #[arg(long)]
        json: bool,
    },

    /// Confirm the pending invoice and update stock (asks first)
    Confirm,

    /// Discard the pending invoice
    Cancel,

    /// Leave the terminal
    #[command(visible_alias = "exit")]
    Quit,
}

/// Parses one input line. Clap's help and usage output comes back as `Err`.
pub fn parse_line(line: &str) -> Result<ReplCommand, clap::Error> {
    Line::try_parse_from(line.split_whitespace()).map(|l| l.command)
}

/// What the loop should do after a command.
enum Flow {
    Continue,
    Quit,
}

struct Repl<'a, R, W> {
    session: &'a mut Session,
    input: R,
    output: W,
}

/// Runs the loop until end of input or `quit`.
pub fn run_repl<R: BufRead, W: Write>(
    session: &mut Session,
    input: R,
    output: W,
) -> io::Result<()> {
    let mut repl = Repl {
        session,
        input,
        output,
    };
    repl.run()
}

impl<R: BufRead, W: Write> Repl<'_, R, W> {
    fn run(&mut self) -> io::Result<()> {
        writeln!(
            self.output,
            "{} | tax {} | type `help` for commands",
            self.session.config.store_name,
            self.session.config.tax_label()
        )?;

        loop {
            write!(self.output, "{}", PROMPT)?;
            self.output.flush()?;

            let Some(line) = self.read_line()? else {
                writeln!(self.output)?;
                break;
            };
            if line.trim().is_empty() {
                continue;
            }

            let command = match parse_line(&line) {
                Ok(command) => command,
                Err(e) => {
                    if e.kind() != ErrorKind::DisplayHelp {
                        debug!(line = %line.trim(), "Unparseable command");
                    }
                    write!(self.output, "{}", e.render())?;
                    continue;
                }
            };

            match self.execute(command)? {
                Flow::Continue => {}
                Flow::Quit => break,
            }
        }

        info!("Leaving terminal");
        Ok(())
    }

    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        match self.input.read_line(&mut line)? {
            0 => Ok(None),
            _ => Ok(Some(line)),
        }
    }

    /// Asks a yes/no question. Anything but `y`/`yes` (or end of input) is no.
    fn ask(&mut self, question: &str) -> io::Result<bool> {
        write!(self.output, "{} [y/N] ", question)?;
        self.output.flush()?;

        let answer = self.read_line()?.unwrap_or_default();
        Ok(matches!(
            answer.trim().to_ascii_lowercase().as_str(),
            "y" | "yes"
        ))
    }

    fn print(&mut self, result: Result<String, ApiError>) -> io::Result<()> {
        match result {
            Ok(text) => writeln!(self.output, "{}", text),
            Err(e) => writeln!(self.output, "{}", e),
        }
    }

    fn execute(&mut self, command: ReplCommand) -> io::Result<Flow> {
        let config = self.session.config.clone();

        let result = match command {
            ReplCommand::Products => Ok(render::products(
                &product::list_products(self.session),
                &config,
            )),
            ReplCommand::Cart => Ok(render::cart(&cart::get_cart(self.session), &config)),
            ReplCommand::Add {
                product_id,
                quantity,
            } => cart::add_to_cart(self.session, &product_id, quantity.as_deref())
                .map(|c| render::cart(&c, &config)),
            ReplCommand::Remove { product_id } => Ok(render::cart(
                &cart::remove_from_cart(self.session, &product_id),
                &config,
            )),
            ReplCommand::Qty {
                product_id,
                quantity,
            } => cart::update_cart_item(self.session, &product_id, &quantity)
                .map(|c| render::cart(&c, &config)),
            ReplCommand::Clear => {
                let current = self.session.pos.cart();
                let question = format!(
                    "Empty the cart ({} lines, {} items)?",
                    current.line_count(),
                    current.total_quantity()
                );
                if current.is_empty() {
                    Ok("Cart is already empty.".to_string())
                } else if self.ask(&question)? {
                    Ok(render::cart(&cart::clear_cart(self.session), &config))
                } else {
                    Ok("Cart kept.".to_string())
                }
            }
            ReplCommand::Checkout => checkout::checkout(self.session).map(|invoice| {
                format!(
                    "{}\nType `confirm` to complete the purchase or `cancel` to discard it.",
                    render::invoice(&invoice, &config)
                )
            }),
            ReplCommand::Invoice { json } => {
                checkout::get_pending_invoice(self.session).and_then(|invoice| {
                    if json {
                        invoice
                            .to_json()
                            .map_err(|e| ApiError::new(ErrorCode::InvoiceError, e.to_string()))
                    } else {
                        Ok(render::invoice(&invoice, &config))
                    }
                })
            }
            ReplCommand::Confirm => self.confirm(&config)?,
            ReplCommand::Cancel => checkout::cancel_invoice(self.session)
                .map(|()| "Invoice cancelled. The cart is unchanged.".to_string()),
            ReplCommand::Quit => return Ok(Flow::Quit),
        };

        self.print(result)?;
        Ok(Flow::Continue)
    }

    fn confirm(&mut self, config: &ConfigState) -> io::Result<Result<String, ApiError>> {
        let number = match self.session.pos.pending_invoice() {
            Some(invoice) => invoice.number.clone(),
            // Let the command report the missing invoice.
            None => {
                return Ok(checkout::confirm_purchase(self.session)
                    .map(|r| render::confirmed(&r, config)))
            }
        };

        if !self.ask(&format!("Confirm purchase of invoice {}?", number))? {
            return Ok(Ok(
                "Purchase not confirmed. The invoice is still pending.".to_string(),
            ));
        }

        Ok(checkout::confirm_purchase(self.session).map(|r| render::confirmed(&r, config)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use till_core::CheckoutState;

    fn run(session: &mut Session, script: &str) -> String {
        let mut out = Vec::new();
        run_repl(session, Cursor::new(script.to_string()), &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    fn session() -> Session {
        Session::new(ConfigState::default()).unwrap()
    }

    fn stock_of(session: &Session, id: &str) -> i64 {
        session.pos.catalog().get(id).unwrap().stock
    }

    #[test]
    fn test_parse_line() {
        assert_eq!(parse_line("products").unwrap(), ReplCommand::Products);
        assert_eq!(parse_line("ls").unwrap(), ReplCommand::Products);
        assert_eq!(
            parse_line("  add   P001  ").unwrap(),
            ReplCommand::Add {
                product_id: "P001".into(),
                quantity: None
            }
        );
        assert_eq!(
            parse_line("qty P001 -1").unwrap(),
            ReplCommand::Qty {
                product_id: "P001".into(),
                quantity: "-1".into()
            }
        );
        assert_eq!(
            parse_line("invoice --json").unwrap(),
            ReplCommand::Invoice { json: true }
        );
    }

    #[test]
    fn test_parse_line_errors() {
        assert!(parse_line("sell P001").is_err());
        assert!(parse_line("add").is_err());

        let help = parse_line("help").unwrap_err();
        assert_eq!(help.kind(), ErrorKind::DisplayHelp);
        assert!(help.render().to_string().contains("checkout"));
    }

    #[test]
    fn test_full_purchase() {
        let mut session = session();
        let out = run(&mut session, "add P001 2\ncheckout\nconfirm\ny\n");

        assert!(out.contains("Total: $16.95"));
        assert!(out.contains("Invoice #F-"));
        assert!(out.contains("Purchase confirmed!"));
        assert_eq!(stock_of(&session, "P001"), 23);
        assert!(session.pos.cart().is_empty());
        assert_eq!(session.pos.state(), CheckoutState::Idle);
    }

    #[test]
    fn test_confirm_declined_keeps_invoice() {
        let mut session = session();
        let out = run(&mut session, "add P002\ncheckout\nconfirm\nn\n");

        assert!(out.contains("still pending"));
        assert_eq!(session.pos.state(), CheckoutState::PendingConfirmation);
        assert_eq!(stock_of(&session, "P002"), 40);
    }

    #[test]
    fn test_confirm_without_invoice() {
        let mut session = session();
        let out = run(&mut session, "confirm\n");
        assert!(out.contains("error[INVOICE_ERROR]"));
    }

    #[test]
    fn test_clear_asks_first() {
        let mut session = session();
        let out = run(&mut session, "add P003 2\nadd P001\nclear\nno\n");
        assert!(out.contains("Empty the cart (2 lines, 3 items)? [y/N]"));
        assert_eq!(session.pos.cart().quantity_of("P003"), 2);

        run(&mut session, "clear\nyes\n");
        assert!(session.pos.cart().is_empty());
    }

    #[test]
    fn test_errors_do_not_stop_the_loop() {
        let mut session = session();
        let out = run(&mut session, "add P999\nfrobnicate\nadd P001 30\nadd P001 3\n");

        assert!(out.contains("error[NOT_FOUND]: Product not found: P999"));
        assert!(out.contains("error[INSUFFICIENT_STOCK]"));
        assert_eq!(session.pos.cart().quantity_of("P001"), 3);
    }

    #[test]
    fn test_quit_stops_reading() {
        let mut session = session();
        run(&mut session, "quit\nadd P001\n");
        assert!(session.pos.cart().is_empty());
    }

    #[test]
    fn test_invoice_json() {
        let mut session = session();
        let out = run(&mut session, "add P001 2\ncheckout\ninvoice --json\n");
        assert!(out.contains("\"productId\": \"P001\""));
    }
}
