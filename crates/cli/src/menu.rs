use std::fmt::Display;
use std::io::{self, BufRead, Write};
use std::str::FromStr;

use thiserror::Error;

use storekeep_core::{DomainError, Entity, ProductId};
use storekeep_infra::{Repository, SalesLedger, StoreError};
use storekeep_products::{
    CatalogEntry, Discount, Priced, Product, ProductPatch, ProductRecord, SpecialProduct,
};
use storekeep_sales::Sale;

const MENU: &str = "\n===== PRODUCT REGISTRY =====
1. Register product
2. List products
3. Update product
4. Delete product
5. Register sale
6. Sales report
7. Exit";

#[derive(Debug, Error)]
enum ActionError {
    #[error("input closed")]
    Eof,

    #[error(transparent)]
    Io(#[from] io::Error),

    #[error("invalid input: {0}")]
    Input(String),

    #[error("invalid input: {0}")]
    Domain(#[from] DomainError),

    #[error("error: {0}")]
    Store(#[from] StoreError),
}

type ActionResult = Result<(), ActionError>;

/// Run the interactive menu until the user exits or `input` is exhausted.
///
/// Only terminal I/O failures end the loop with an error; rejected input and
/// store errors are reported and the menu is shown again.
pub fn run<P, L, I, O>(sales: &SalesLedger<P, L>, input: I, output: &mut O) -> io::Result<()>
where
    P: Repository<ProductRecord>,
    L: Repository<Sale>,
    I: BufRead,
    O: Write,
{
    let mut session = Session {
        sales,
        input,
        output,
    };
    session.run()
}

struct Session<'a, P, L, I, O> {
    sales: &'a SalesLedger<P, L>,
    input: I,
    output: &'a mut O,
}

impl<P, L, I, O> Session<'_, P, L, I, O>
where
    P: Repository<ProductRecord>,
    L: Repository<Sale>,
    I: BufRead,
    O: Write,
{
    fn run(&mut self) -> io::Result<()> {
        loop {
            writeln!(self.output, "{MENU}")?;
            let choice = match self.prompt("\nSelect an option: ") {
                Ok(c) => c,
                Err(ActionError::Io(e)) => return Err(e),
                Err(_) => return Ok(()),
            };

            let outcome = match choice.trim() {
                "1" => self.register_product(),
                "2" => self.list_products(),
                "3" => self.update_product(),
                "4" => self.delete_product(),
                "5" => self.register_sale(),
                "6" => self.report(),
                "7" => {
                    writeln!(self.output, "Goodbye!")?;
                    return Ok(());
                }
                other => {
                    writeln!(self.output, "Unknown option '{other}'")?;
                    continue;
                }
            };

            match outcome {
                Ok(()) => {}
                Err(ActionError::Eof) => return Ok(()),
                Err(ActionError::Io(e)) => return Err(e),
                Err(e) => {
                    tracing::debug!(error = %e, "menu action rejected");
                    writeln!(self.output, "{e}")?;
                }
            }
        }
    }

    fn prompt(&mut self, label: &str) -> Result<String, ActionError> {
        write!(self.output, "{label}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(ActionError::Eof);
        }
        Ok(line.trim().to_string())
    }

    fn prompt_parsed<T>(&mut self, label: &str) -> Result<T, ActionError>
    where
        T: FromStr,
        T::Err: Display,
    {
        let raw = self.prompt(label)?;
        parse_field(label, &raw)
    }

    /// Blank answer means "keep the current value".
    fn prompt_optional<T>(&mut self, label: &str) -> Result<Option<T>, ActionError>
    where
        T: FromStr,
        T::Err: Display,
    {
        let raw = self.prompt(label)?;
        if raw.is_empty() {
            return Ok(None);
        }
        parse_field(label, &raw).map(Some)
    }

    fn register_product(&mut self) -> ActionResult {
        let id: ProductId = self.prompt_parsed("ID: ")?;
        let name = self.prompt("Name: ")?;
        let price: f64 = self.prompt_parsed("Price: ")?;
        let category = self.prompt("Category: ")?;
        let stock: u32 = self.prompt_parsed("Stock: ")?;
        let discount: Option<f64> = self.prompt_optional("Discount 0-1 (Enter for none): ")?;

        let product = Product::new(id, name, price, category, stock)?;
        let entry = match discount {
            Some(d) => CatalogEntry::from(SpecialProduct::new(product, Discount::new(d)?)),
            None => CatalogEntry::from(product),
        };

        self.sales.products().register(entry)?;
        writeln!(self.output, "Product {id} registered.")?;
        Ok(())
    }

    fn list_products(&mut self) -> ActionResult {
        let entries = self.sales.products().list_all()?;
        if entries.is_empty() {
            writeln!(self.output, "No products registered.")?;
            return Ok(());
        }
        for entry in &entries {
            writeln!(self.output, "{}", describe(entry))?;
        }
        Ok(())
    }

    fn update_product(&mut self) -> ActionResult {
        let id: ProductId = self.prompt_parsed("ID: ")?;
        let patch = ProductPatch {
            name: self.prompt_optional("New name (Enter to keep): ")?,
            base_price: self.prompt_optional("New price (Enter to keep): ")?,
            category: self.prompt_optional("New category (Enter to keep): ")?,
            stock: self.prompt_optional("New stock (Enter to keep): ")?,
            discount: self.prompt_optional("New discount (Enter to keep): ")?,
        };

        if patch.is_empty() {
            writeln!(self.output, "Nothing to update.")?;
            return Ok(());
        }

        let updated = self.sales.products().update(id, &patch)?;
        writeln!(self.output, "Updated: {}", describe(&updated))?;
        Ok(())
    }

    fn delete_product(&mut self) -> ActionResult {
        let id: ProductId = self.prompt_parsed("ID of the product to delete: ")?;
        if self.sales.products().remove(id)? {
            writeln!(self.output, "Product {id} deleted.")?;
        } else {
            writeln!(self.output, "No product with id {id}.")?;
        }
        Ok(())
    }

    fn register_sale(&mut self) -> ActionResult {
        let id: ProductId = self.prompt_parsed("ID of the product sold: ")?;
        let quantity: u32 = self.prompt_parsed("Quantity: ")?;

        let sale = self.sales.register_sale(id, quantity)?;
        writeln!(
            self.output,
            "Sale registered: {} x product {} = {:.2}",
            sale.quantity, sale.product_id, sale.total
        )?;
        Ok(())
    }

    fn report(&mut self) -> ActionResult {
        let report = self.sales.generate_report()?;
        writeln!(self.output, "Sales:")?;
        for sale in &report.sales {
            writeln!(
                self.output,
                "  {}  product {}  qty {}  total {:.2}",
                sale.timestamp.format("%Y-%m-%d %H:%M:%S"),
                sale.product_id,
                sale.quantity,
                sale.total
            )?;
        }
        writeln!(self.output, "Total: {:.2}", report.total)?;
        Ok(())
    }
}

fn parse_field<T>(label: &str, raw: &str) -> Result<T, ActionError>
where
    T: FromStr,
    T::Err: Display,
{
    raw.parse().map_err(|e: T::Err| {
        let field = label.split(['(', ':']).next().unwrap_or(label).trim();
        ActionError::Input(format!("{field} '{raw}': {e}"))
    })
}

fn describe(entry: &CatalogEntry) -> String {
    let mut line = format!(
        "#{} {} [{}] price {:.2}",
        entry.id(),
        entry.name(),
        entry.category(),
        entry.base_price()
    );
    if let Some(discount) = entry.discount() {
        line.push_str(&format!(
            " -{:.0}% => {:.2}",
            discount.value() * 100.0,
            entry.final_price()
        ));
    }
    line.push_str(&format!(" stock {}", entry.stock()));
    line
}
