//! Reference dataset for trying out and testing the data operations.
//!
//! Creates the `ContactType` and `Customers` tables in a fresh catalog file and
//! fills them with 91 customers. Several rows leave region, postal code, fax
//! or modification date empty so nullable columns are exercised.

use crate::core::{DataError, Result};
use rusqlite::{params, Connection};
use std::path::Path;
use tracing::info;

/// Number of customers `seed_reference_store` inserts
pub const REFERENCE_CUSTOMER_COUNT: usize = 91;

const SCHEMA_SQL: &str = r#"
CREATE TABLE ContactType (
    ContactTypeIdentifier INTEGER PRIMARY KEY,
    ContactTitle TEXT NOT NULL
);

CREATE TABLE Customers (
    CustomerIdentifier INTEGER PRIMARY KEY,
    CompanyName TEXT NOT NULL,
    ContactName TEXT NOT NULL,
    ContactTypeIdentifier INTEGER REFERENCES ContactType (ContactTypeIdentifier),
    Address TEXT NOT NULL,
    City TEXT NOT NULL,
    Region TEXT,
    PostalCode TEXT,
    Country TEXT NOT NULL,
    Phone TEXT NOT NULL,
    Fax TEXT,
    ModifiedDate TEXT
);
"#;

const CONTACT_TITLES: [&str; 12] = [
    "Accounting Manager",
    "Assistant Sales Agent",
    "Assistant Sales Representative",
    "Marketing Assistant",
    "Marketing Manager",
    "Order Administrator",
    "Owner",
    "Owner/Marketing Assistant",
    "Sales Agent",
    "Sales Associate",
    "Sales Manager",
    "Sales Representative",
];

/// (company, city, country) in identifier order, starting at 1
const COMPANIES: [(&str, &str, &str); REFERENCE_CUSTOMER_COUNT] = [
    ("Alfreds Futterkiste", "Berlin", "Germany"),
    ("Ana Trujillo Emparedados y helados", "México D.F.", "Mexico"),
    ("Antonio Moreno Taquería", "México D.F.", "Mexico"),
    ("Around the Horn", "London", "UK"),
    ("Berglunds snabbköp", "Luleå", "Sweden"),
    ("Blauer See Delikatessen", "Mannheim", "Germany"),
    ("Blondesddsl père et fils", "Strasbourg", "France"),
    ("Bólido Comidas preparadas", "Madrid", "Spain"),
    ("Bon app'", "Marseille", "France"),
    ("Bottom-Dollar Markets", "Tsawassen", "Canada"),
    ("B's Beverages", "London", "UK"),
    ("Cactus Comidas para llevar", "Buenos Aires", "Argentina"),
    ("Centro comercial Moctezuma", "México D.F.", "Mexico"),
    ("Consolidated Holdings", "London", "UK"),
    ("Chop-suey Chinese", "Bern", "Switzerland"),
    ("Comércio Mineiro", "São Paulo", "Brazil"),
    ("Drachenblut Delikatessen", "Aachen", "Germany"),
    ("Du monde entier", "Nantes", "France"),
    ("Eastern Connection", "London", "UK"),
    ("Ernst Handel", "Graz", "Austria"),
    ("Familia Arquibaldo", "São Paulo", "Brazil"),
    ("FISSA Fabrica Inter. Salchichas S.A.", "Madrid", "Spain"),
    ("Folies gourmandes", "Lille", "France"),
    ("Folk och fä HB", "Bräcke", "Sweden"),
    ("Frankenversand", "München", "Germany"),
    ("France restauration", "Nantes", "France"),
    ("Franchi S.p.A.", "Torino", "Italy"),
    ("Furia Bacalhau e Frutos do Mar", "Lisboa", "Portugal"),
    ("Galería del gastrónomo", "Barcelona", "Spain"),
    ("Godos Cocina Típica", "Sevilla", "Spain"),
    ("Gourmet Lanchonetes", "Campinas", "Brazil"),
    ("Great Lakes Food Market", "Eugene", "USA"),
    ("GROSELLA-Restaurante", "Caracas", "Venezuela"),
    ("Hanari Carnes", "Rio de Janeiro", "Brazil"),
    ("HILARION-Abastos", "San Cristóbal", "Venezuela"),
    ("Hungry Coyote Import Store", "Elgin", "USA"),
    ("Hungry Owl All-Night Grocers", "Cork", "Ireland"),
    ("Island Trading", "Cowes", "UK"),
    ("Königlich Essen", "Brandenburg", "Germany"),
    ("La corne d'abondance", "Versailles", "France"),
    ("La maison d'Asie", "Toulouse", "France"),
    ("Laughing Bacchus Wine Cellars", "Vancouver", "Canada"),
    ("Lazy K Kountry Store", "Walla Walla", "USA"),
    ("Lehmanns Marktstand", "Frankfurt a.M.", "Germany"),
    ("Let's Stop N Shop", "San Francisco", "USA"),
    ("LILA-Supermercado", "Barquisimeto", "Venezuela"),
    ("LINO-Delicateses", "I. de Margarita", "Venezuela"),
    ("Lonesome Pine Restaurant", "Portland", "USA"),
    ("Magazzini Alimentari Riuniti", "Bergamo", "Italy"),
    ("Maison Dewey", "Bruxelles", "Belgium"),
    ("Mère Paillarde", "Montréal", "Canada"),
    ("Morgenstern Gesundkost", "Leipzig", "Germany"),
    ("North/South", "London", "UK"),
    ("Océano Atlántico Ltda.", "Buenos Aires", "Argentina"),
    ("Old World Delicatessen", "Anchorage", "USA"),
    ("Ottilies Käseladen", "Köln", "Germany"),
    ("Paris spécialités", "Paris", "France"),
    ("Pericles Comidas clásicas", "México D.F.", "Mexico"),
    ("Piccolo und mehr", "Salzburg", "Austria"),
    ("Princesa Isabel Vinhos", "Lisboa", "Portugal"),
    ("Que Delícia", "Rio de Janeiro", "Brazil"),
    ("Queen Cozinha", "São Paulo", "Brazil"),
    ("QUICK-Stop", "Cunewalde", "Germany"),
    ("Rancho grande", "Buenos Aires", "Argentina"),
    ("Rattlesnake Canyon Grocery", "Albuquerque", "USA"),
    ("Reggiani Caseifici", "Reggio Emilia", "Italy"),
    ("Ricardo Adocicados", "Rio de Janeiro", "Brazil"),
    ("Richter Supermarkt", "Genève", "Switzerland"),
    ("Romero y tomillo", "Madrid", "Spain"),
    ("Santé Gourmet", "Stavern", "Norway"),
    ("Save-a-lot Markets", "Boise", "USA"),
    ("Seven Seas Imports", "London", "UK"),
    ("Simons bistro", "København", "Denmark"),
    ("Spécialités du monde", "Paris", "France"),
    ("Split Rail Beer & Ale", "Lander", "USA"),
    ("Suprêmes délices", "Charleroi", "Belgium"),
    ("The Big Cheese", "Portland", "USA"),
    ("The Cracker Box", "Butte", "USA"),
    ("Toms Spezialitäten", "Münster", "Germany"),
    ("Tortuga Restaurante", "México D.F.", "Mexico"),
    ("Tradição Hipermercados", "São Paulo", "Brazil"),
    ("Trail's Head Gourmet Provisioners", "Kirkland", "USA"),
    ("Vaffeljernet", "Århus", "Denmark"),
    ("Victuailles en stock", "Lyon", "France"),
    ("Vins et alcools Chevalier", "Reims", "France"),
    ("Die Wandernde Kuh", "Stuttgart", "Germany"),
    ("Wartian Herkku", "Oulu", "Finland"),
    ("Wellington Importadora", "Resende", "Brazil"),
    ("White Clover Markets", "Seattle", "USA"),
    ("Wilman Kala", "Helsinki", "Finland"),
    ("Wolski Zajazd", "Warszawa", "Poland"),
];

const FIRST_NAMES: [&str; 8] = [
    "Maria", "Ana", "Antonio", "Thomas", "Christina", "Hanna", "Frédérique", "Martín",
];

const LAST_NAMES: [&str; 7] = ["Anders", "Trujillo", "Moreno", "Hardy", "Berglund", "Moos", "Citeaux"];

/// Company name seeded for customer `id`
pub fn company_name(id: i64) -> Option<&'static str> {
    usize::try_from(id)
        .ok()
        .and_then(|id| id.checked_sub(1))
        .and_then(|index| COMPANIES.get(index))
        .map(|(company, _, _)| *company)
}

/// Creates the reference catalog at `path` and returns the number of customers inserted.
///
/// Fails if the file already holds the reference tables.
pub fn seed_reference_store(path: &Path) -> Result<usize> {
    let mut conn = Connection::open(path).map_err(DataError::StoreUnavailable)?;
    conn.execute_batch(SCHEMA_SQL).map_err(DataError::QueryRejected)?;

    let tx = conn.transaction().map_err(DataError::StoreUnavailable)?;
    {
        let mut insert_title = tx
            .prepare("INSERT INTO ContactType (ContactTypeIdentifier, ContactTitle) VALUES (?1, ?2)")
            .map_err(DataError::QueryRejected)?;
        for (id, title) in (1i64..).zip(CONTACT_TITLES) {
            insert_title.execute(params![id, title]).map_err(DataError::QueryRejected)?;
        }

        let mut insert_customer = tx
            .prepare(
                "INSERT INTO Customers (CustomerIdentifier, CompanyName, ContactName,
                    ContactTypeIdentifier, Address, City, Region, PostalCode, Country,
                    Phone, Fax, ModifiedDate)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)",
            )
            .map_err(DataError::QueryRejected)?;
        for (id, (company, city, country)) in (1i64..).zip(COMPANIES) {
            let seed = id.unsigned_abs() as usize;
            let contact = format!(
                "{} {}",
                FIRST_NAMES[seed % FIRST_NAMES.len()],
                LAST_NAMES[seed % LAST_NAMES.len()]
            );
            let contact_type = (id - 1) % CONTACT_TITLES.len() as i64 + 1;
            let region = matches!(country, "USA" | "Canada" | "Brazil" | "Venezuela")
                .then(|| format!("R{:02}", id % 50));
            let postal_code = (id % 10 != 0).then(|| format!("{:05}", id * 137));
            let fax = (id % 3 != 0).then(|| format!("030-{:07}", id * 7919));
            let modified = (id % 2 == 0).then(|| format!("2024-{:02}-{:02} 09:30:00", id % 12 + 1, id % 28 + 1));

            insert_customer
                .execute(params![
                    id,
                    company,
                    contact,
                    contact_type,
                    format!("{} Market Street", id * 11),
                    city,
                    region,
                    postal_code,
                    country,
                    format!("555-{:04}", id * 31),
                    fax,
                    modified,
                ])
                .map_err(DataError::QueryRejected)?;
        }
    }
    tx.commit().map_err(DataError::StoreUnavailable)?;

    info!("Seeded {} customers into {}", COMPANIES.len(), path.display());
    Ok(COMPANIES.len())
}
