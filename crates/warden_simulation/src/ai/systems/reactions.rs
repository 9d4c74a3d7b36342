//! AI reaction systems (alert broadcast по контакту с игроком).

use bevy::prelude::*;

use crate::ai::{
    AlertPeers, EnemyAlerted, EnemyContact, EnemyState, EnemyStateChanged, InvestigationTimer,
    MovementTarget,
};
use crate::components::{CollisionClass, Player};

/// System: враг коснулся игрока → все его соседи сразу в Pursuing
///
/// Соседи берутся из `AlertPeers` коснувшегося врага (не скан всего мира).
/// Собственный detection range соседей не проверяется. Despawned соседи
/// пропускаются. Сам коснувшийся не трогается: его ведёт perception.
///
/// Запускается последней в цепочке: после тика сосед виден как Pursuing
/// с целью = позиция игрока.
pub fn broadcast_contact_alerts(
    mut contacts: EventReader<EnemyContact>,
    players: Query<&Transform, With<Player>>,
    sources: Query<&AlertPeers>,
    mut peers: Query<(&mut EnemyState, &mut InvestigationTimer, &mut MovementTarget)>,
    mut alerts: EventWriter<EnemyAlerted>,
    mut changes: EventWriter<EnemyStateChanged>,
) -> Result {
    if contacts.is_empty() {
        return Ok(());
    }
    let player_position = players.single()?.translation;

    for contact in contacts.read() {
        if contact.other != CollisionClass::Player {
            continue;
        }
        let Ok(alert_peers) = sources.get(contact.enemy) else {
            continue;
        };

        crate::log_info(&format!(
            "📢 {:?} touched the player → alerting {} peers",
            contact.enemy,
            alert_peers.peers.len()
        ));

        for &peer in &alert_peers.peers {
            if peer == contact.enemy {
                continue;
            }
            let Ok((mut state, mut timer, mut target)) = peers.get_mut(peer) else {
                continue;
            };

            timer.cancel();
            target.0 = player_position;
            if *state != EnemyState::Pursuing {
                changes.write(EnemyStateChanged {
                    enemy: peer,
                    from: *state,
                    to: EnemyState::Pursuing,
                });
                *state = EnemyState::Pursuing;
            }
            alerts.write(EnemyAlerted {
                enemy: peer,
                source: contact.enemy,
            });
        }
    }

    Ok(())
}
