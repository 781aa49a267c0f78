//! Client storage.

use chrono::NaiveDate;
use shopapi_core::{
    AddClientRequest, AddClientResponse, Address, Client, ClientUid, DeleteClientRequest,
    DeleteClientResponse, Gender, GetClientsByNameRequest, GetClientsByNameResponse,
    GetClientsRequest, GetClientsResponse, PatchClientAddressRequest, PatchClientAddressResponse,
    Status,
};
use sqlx::PgConnection;

use super::{PgStorage, RepositoryError, address, limit_of, tx};
use crate::service::ClientStorage;

const SELECT_CLIENT: &str = r"
    SELECT c.uid, c.client_name, c.client_surname, c.birthday, c.registration_date,
           c.gender, a.country, a.city, a.street
    FROM shop.client c
    JOIN shop.address a ON a.id = c.address_id
";

#[derive(Debug, sqlx::FromRow)]
struct ClientRow {
    uid: ClientUid,
    client_name: String,
    client_surname: String,
    birthday: NaiveDate,
    registration_date: NaiveDate,
    gender: Gender,
    country: String,
    city: String,
    street: String,
}

impl From<ClientRow> for Client {
    fn from(row: ClientRow) -> Self {
        Self {
            uid: row.uid,
            birthday: row.birthday.into(),
            registration_date: row.registration_date.into(),
            name: row.client_name,
            surname: row.client_surname,
            gender: row.gender,
            address: Address {
                country: row.country,
                city: row.city,
                street: row.street,
            },
        }
    }
}

impl ClientStorage for PgStorage {
    async fn add_client(&self, req: &AddClientRequest) -> Result<AddClientResponse, RepositoryError> {
        self.bounded(async {
            let mut tx = tx::begin(&self.pool).await?;
            let result = insert_client(&mut tx, &req.client).await;
            tx::finish(tx, result).await
        })
        .await
    }

    async fn delete_client(
        &self,
        req: &DeleteClientRequest,
    ) -> Result<DeleteClientResponse, RepositoryError> {
        self.bounded(async {
            let mut tx = tx::begin(&self.pool).await?;
            let result = remove_client(&mut tx, req.uid).await;
            tx::finish(tx, result).await
        })
        .await
    }

    async fn get_clients(
        &self,
        req: &GetClientsRequest,
    ) -> Result<GetClientsResponse, RepositoryError> {
        let page = req.page();
        self.bounded(async {
            let rows: Vec<ClientRow> =
                sqlx::query_as(&format!("{SELECT_CLIENT} ORDER BY c.uid LIMIT $1 OFFSET $2"))
                    .bind(limit_of(page))
                    .bind(i64::from(page.offset))
                    .fetch_all(&self.pool)
                    .await?;

            Ok(GetClientsResponse {
                cached: false,
                clients: rows.into_iter().map(Client::from).collect(),
            })
        })
        .await
    }

    async fn get_clients_by_name(
        &self,
        req: &GetClientsByNameRequest,
    ) -> Result<GetClientsByNameResponse, RepositoryError> {
        self.bounded(async {
            let rows: Vec<ClientRow> = sqlx::query_as(&format!(
                "{SELECT_CLIENT} WHERE c.client_name = $1 AND c.client_surname = $2 ORDER BY c.uid"
            ))
            .bind(&req.name)
            .bind(&req.surname)
            .fetch_all(&self.pool)
            .await?;

            Ok(GetClientsByNameResponse {
                cached: false,
                clients: rows.into_iter().map(Client::from).collect(),
            })
        })
        .await
    }

    async fn patch_client_address(
        &self,
        req: &PatchClientAddressRequest,
    ) -> Result<PatchClientAddressResponse, RepositoryError> {
        self.bounded(async {
            let mut tx = tx::begin(&self.pool).await?;
            let result = repoint_client_address(&mut tx, req.uid, &req.address).await;
            tx::finish(tx, result).await
        })
        .await
    }
}

// =============================================================================
// Transaction bodies
// =============================================================================

async fn insert_client(
    conn: &mut PgConnection,
    client: &Client,
) -> Result<AddClientResponse, RepositoryError> {
    let address_id = address::insert(conn, &client.address).await?;

    let inserted: Option<ClientUid> = sqlx::query_scalar(
        r"
        INSERT INTO shop.client
            (uid, client_name, client_surname, birthday, registration_date, gender, address_id)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        ON CONFLICT (uid) DO NOTHING
        RETURNING uid
        ",
    )
    .bind(client.uid.or_generate())
    .bind(&client.name)
    .bind(&client.surname)
    .bind(client.birthday.as_naive())
    .bind(client.registration_date.as_naive())
    .bind(client.gender)
    .bind(address_id)
    .fetch_optional(&mut *conn)
    .await?;

    match inserted {
        Some(uid) => Ok(AddClientResponse::created(uid)),
        None => {
            address::collect(conn, address_id).await?;
            Ok(AddClientResponse::with_status(Status::AlreadyExists))
        }
    }
}

async fn remove_client(
    conn: &mut PgConnection,
    uid: ClientUid,
) -> Result<DeleteClientResponse, RepositoryError> {
    let address_id: Option<i32> =
        sqlx::query_scalar("DELETE FROM shop.client WHERE uid = $1 RETURNING address_id")
            .bind(uid)
            .fetch_optional(&mut *conn)
            .await?;

    let Some(address_id) = address_id else {
        return Ok(DeleteClientResponse::with_status(Status::NotFound));
    };

    address::collect(conn, address_id).await?;
    Ok(DeleteClientResponse::with_status(Status::Success))
}

async fn repoint_client_address(
    conn: &mut PgConnection,
    uid: ClientUid,
    new_address: &Address,
) -> Result<PatchClientAddressResponse, RepositoryError> {
    let new_id = address::insert(conn, new_address).await?;

    // Self-join exposes the pre-update address id
    let previous: Option<i32> = sqlx::query_scalar(
        r"
        UPDATE shop.client c
        SET address_id = $2
        FROM shop.client old
        WHERE c.uid = old.uid AND c.uid = $1
        RETURNING old.address_id
        ",
    )
    .bind(uid)
    .bind(new_id)
    .fetch_optional(&mut *conn)
    .await?;

    let Some(previous) = previous else {
        address::collect(conn, new_id).await?;
        return Ok(PatchClientAddressResponse::with_status(Status::NotFound));
    };

    address::collect(conn, previous).await?;
    Ok(PatchClientAddressResponse::with_status(Status::Success))
}
