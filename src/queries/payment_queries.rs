use chrono::Utc;
use sea_orm::{ActiveModelTrait, ConnectionTrait, DbErr, Set};

use crate::entities::payment;
use crate::models::payment::PaymentRequest;

pub async fn insert_payment<C: ConnectionTrait>(
    db: &C,
    req: &PaymentRequest,
) -> Result<payment::Model, DbErr> {
    payment::ActiveModel {
        customer_id: Set(req.customer_id),
        staff_id: Set(req.staff_id),
        rental_id: Set(req.rental_id),
        amount: Set(req.amount),
        payment_date: Set(Utc::now()),
        ..Default::default()
    }
    .insert(db)
    .await
}
