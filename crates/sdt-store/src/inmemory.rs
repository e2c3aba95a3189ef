use async_trait::async_trait;
use sdt_core::{
    Database, DatabaseUpdate, Datatype, DatatypeUpdate, Error, Field, FieldUpdate, MetadataStore,
    NewDatabase, NewDatatype, NewField, NewProject, NewTable, Project, ProjectUpdate, Result,
    SchemaReader, Table, TableUpdate,
};
use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Process-local metadata store.
///
/// Ids are assigned from per-entity counters starting at 1 and never reused,
/// matching the behavior of the SQL backends' serial keys.
pub struct InMemoryStore {
    state: RwLock<State>,
}

#[derive(Default)]
struct State {
    databases: BTreeMap<i64, Database>,
    projects: BTreeMap<i64, Project>,
    tables: BTreeMap<i64, Table>,
    fields: BTreeMap<i64, Field>,
    datatypes: BTreeMap<i64, Datatype>,
    last_ids: LastIds,
}

#[derive(Default)]
struct LastIds {
    database: i64,
    project: i64,
    table: i64,
    field: i64,
    datatype: i64,
}

fn next(counter: &mut i64) -> i64 {
    *counter += 1;
    *counter
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self {
            state: RwLock::new(State::default()),
        }
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, State>> {
        self.state
            .read()
            .map_err(|_| Error::unavailable("in-memory store lock poisoned"))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, State>> {
        self.state
            .write()
            .map_err(|_| Error::unavailable("in-memory store lock poisoned"))
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl State {
    fn require_project(&self, project_id: i64) -> Result<()> {
        if self.projects.contains_key(&project_id) {
            Ok(())
        } else {
            Err(Error::invalid_input(format!(
                "project {} does not exist",
                project_id
            )))
        }
    }

    fn require_table(&self, table_id: i64) -> Result<()> {
        if self.tables.contains_key(&table_id) {
            Ok(())
        } else {
            Err(Error::invalid_input(format!(
                "table {} does not exist",
                table_id
            )))
        }
    }

    fn remove_table_cascade(&mut self, table_id: i64) -> bool {
        let removed = self.tables.remove(&table_id).is_some();
        if removed {
            self.fields.retain(|_, f| f.table_id != table_id);
        }
        removed
    }
}

#[async_trait]
impl SchemaReader for InMemoryStore {
    async fn get_table(&self, table_id: i64) -> Result<Option<Table>> {
        Ok(self.read()?.tables.get(&table_id).cloned())
    }

    async fn list_fields(&self, table_id: i64) -> Result<Vec<Field>> {
        let state = self.read()?;
        Ok(state
            .fields
            .values()
            .filter(|f| f.table_id == table_id)
            .cloned()
            .collect())
    }

    async fn sql_type_name(&self, datatype_id: i64) -> Result<Option<String>> {
        Ok(self
            .read()?
            .datatypes
            .get(&datatype_id)
            .map(|d| d.sql_type_name.clone()))
    }
}

#[async_trait]
impl MetadataStore for InMemoryStore {
    async fn ping(&self) -> Result<()> {
        self.read().map(|_| ())
    }

    // Databases

    async fn list_databases(&self) -> Result<Vec<Database>> {
        Ok(self.read()?.databases.values().cloned().collect())
    }

    async fn get_database(&self, database_id: i64) -> Result<Option<Database>> {
        Ok(self.read()?.databases.get(&database_id).cloned())
    }

    async fn create_database(&self, req: &NewDatabase) -> Result<Database> {
        let mut state = self.write()?;
        let database = Database {
            database_id: next(&mut state.last_ids.database),
            database_name: req.database_name.clone(),
        };
        state
            .databases
            .insert(database.database_id, database.clone());
        Ok(database)
    }

    async fn update_database(
        &self,
        database_id: i64,
        update: DatabaseUpdate,
    ) -> Result<Option<Database>> {
        let mut state = self.write()?;
        Ok(state.databases.get_mut(&database_id).map(|database| {
            update.apply(database);
            database.clone()
        }))
    }

    async fn delete_database(&self, database_id: i64) -> Result<bool> {
        Ok(self.write()?.databases.remove(&database_id).is_some())
    }

    // Projects

    async fn list_projects(&self) -> Result<Vec<Project>> {
        Ok(self.read()?.projects.values().cloned().collect())
    }

    async fn get_project(&self, project_id: i64) -> Result<Option<Project>> {
        Ok(self.read()?.projects.get(&project_id).cloned())
    }

    async fn create_project(&self, req: &NewProject) -> Result<Project> {
        let mut state = self.write()?;
        let project = Project {
            project_id: next(&mut state.last_ids.project),
            project_name: req.project_name.clone(),
            project_description: req.project_description.clone(),
            database_id: req.database_id,
            database_path: req.database_path.clone(),
            project_path: req.project_path.clone(),
        };
        state.projects.insert(project.project_id, project.clone());
        Ok(project)
    }

    async fn update_project(
        &self,
        project_id: i64,
        update: ProjectUpdate,
    ) -> Result<Option<Project>> {
        let mut state = self.write()?;
        Ok(state.projects.get_mut(&project_id).map(|project| {
            update.apply(project);
            project.clone()
        }))
    }

    async fn delete_project(&self, project_id: i64) -> Result<bool> {
        let mut state = self.write()?;
        if state.projects.remove(&project_id).is_none() {
            return Ok(false);
        }

        let table_ids: Vec<i64> = state
            .tables
            .values()
            .filter(|t| t.project_id == project_id)
            .map(|t| t.table_id)
            .collect();
        for table_id in table_ids {
            state.remove_table_cascade(table_id);
        }

        Ok(true)
    }

    // Tables

    async fn list_tables(&self, project_id: i64) -> Result<Vec<Table>> {
        let state = self.read()?;
        Ok(state
            .tables
            .values()
            .filter(|t| t.project_id == project_id)
            .cloned()
            .collect())
    }

    async fn create_table(&self, req: &NewTable) -> Result<Table> {
        let mut state = self.write()?;
        state.require_project(req.project_id)?;

        let table = Table {
            table_id: next(&mut state.last_ids.table),
            project_id: req.project_id,
            table_name: req.table_name.clone(),
            table_description: req.table_description.clone(),
            is_generated: req.is_generated,
            generated_date: req.generated_date,
        };
        state.tables.insert(table.table_id, table.clone());
        Ok(table)
    }

    async fn update_table(&self, table_id: i64, update: TableUpdate) -> Result<Option<Table>> {
        let mut state = self.write()?;
        Ok(state.tables.get_mut(&table_id).map(|table| {
            update.apply(table);
            table.clone()
        }))
    }

    async fn delete_table(&self, table_id: i64) -> Result<bool> {
        Ok(self.write()?.remove_table_cascade(table_id))
    }

    // Fields

    async fn get_field(&self, field_id: i64) -> Result<Option<Field>> {
        Ok(self.read()?.fields.get(&field_id).cloned())
    }

    async fn create_field(&self, req: &NewField) -> Result<Field> {
        let mut state = self.write()?;
        state.require_table(req.table_id)?;

        let field = Field {
            table_wise_field_id: next(&mut state.last_ids.field),
            table_id: req.table_id,
            field_name: req.field_name.clone(),
            field_datatype_id: req.field_datatype_id,
            is_primary: req.is_primary,
            field_label: req.field_label.clone(),
            display_name: req.display_name.clone(),
            is_auto_increment: req.is_auto_increment,
            is_foreign_key: req.is_foreign_key,
            reference_table_id: req.reference_table_id,
            reference_table_field_id: req.reference_table_field_id,
        };
        state.fields.insert(field.table_wise_field_id, field.clone());
        Ok(field)
    }

    async fn update_field(&self, field_id: i64, update: FieldUpdate) -> Result<Option<Field>> {
        let mut state = self.write()?;
        if let Some(table_id) = update.table_id {
            state.require_table(table_id)?;
        }

        Ok(state.fields.get_mut(&field_id).map(|field| {
            update.apply(field);
            field.clone()
        }))
    }

    async fn delete_field(&self, field_id: i64) -> Result<bool> {
        Ok(self.write()?.fields.remove(&field_id).is_some())
    }

    // Datatypes

    async fn list_datatypes(&self, database_id: Option<i64>) -> Result<Vec<Datatype>> {
        let state = self.read()?;
        Ok(state
            .datatypes
            .values()
            .filter(|d| database_id.is_none_or(|id| d.database_id == id))
            .cloned()
            .collect())
    }

    async fn get_datatype(&self, datatype_id: i64) -> Result<Option<Datatype>> {
        Ok(self.read()?.datatypes.get(&datatype_id).cloned())
    }

    async fn create_datatype(&self, req: &NewDatatype) -> Result<Datatype> {
        let mut state = self.write()?;
        let datatype = Datatype {
            field_datatype_id: next(&mut state.last_ids.datatype),
            database_id: req.database_id,
            display_name: req.display_name.clone(),
            sql_type_name: req.sql_type_name.clone(),
        };
        state
            .datatypes
            .insert(datatype.field_datatype_id, datatype.clone());
        Ok(datatype)
    }

    async fn update_datatype(
        &self,
        datatype_id: i64,
        update: DatatypeUpdate,
    ) -> Result<Option<Datatype>> {
        let mut state = self.write()?;
        Ok(state.datatypes.get_mut(&datatype_id).map(|datatype| {
            update.apply(datatype);
            datatype.clone()
        }))
    }

    async fn delete_datatype(&self, datatype_id: i64) -> Result<bool> {
        Ok(self.write()?.datatypes.remove(&datatype_id).is_some())
    }
}
